use anyhow::Result;
use desk_admin::{AdminApp, ListQuery};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let app = AdminApp::from_env();
    let query = ListQuery::default().page(0).size(app.page_size());
    info!(page_size = app.page_size(), "desk-admin starting");

    let organizations = app.organizations()?;
    organizations.fetch(Some(&query)).await?;
    println!("Organizations");
    for org in organizations.collection() {
        println!(
            "  #{:<6} {:<32} {:<24} {}",
            org.id.0,
            org.name,
            org.domain,
            org.subscription().label()
        );
    }

    let users = app.users()?;
    users.fetch(Some(&query)).await?;
    println!("Users");
    for user in users.collection() {
        println!(
            "  #{:<6} {:<32} {:<32} {}",
            user.id.0,
            user.full_name,
            user.email,
            user.status.as_deref().unwrap_or("-")
        );
    }

    let teams = app.teams()?;
    teams.fetch(Some(&query)).await?;
    println!("Teams");
    for team in teams.collection() {
        println!(
            "  #{:<6} {:<32} {:<16} {}",
            team.id.0,
            team.name,
            team.access_level.as_deref().unwrap_or("-"),
            team.workspace
                .as_ref()
                .map(|w| w.name.as_str())
                .unwrap_or("-")
        );
    }

    Ok(())
}
