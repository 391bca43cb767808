use std::time::Duration;

use competition_store::{CompetitionStore, Tab, NOTIFICATION_MESSAGE};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> competition_store::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("competition_store=debug")),
        )
        .init();

    let store = CompetitionStore::builder().sample_data().build()?;
    let mut events = store.events();

    for tab in [Tab::AllCompetitions, Tab::MyCompetitions] {
        let state = store.snapshot();
        println!("[{}] {}", tab.icon(), tab.title());
        for competition in state.competitions_for(tab) {
            let action = if tab.offers_join() && competition.can_join() { " (+)" } else { "" };
            println!(
                "  {} | {} | {}{action}",
                competition.title,
                competition.start_label(),
                competition.competitors_label()
            );
        }
    }

    let football = store.all_competitions()[1].id;
    if store.join(football).is_joined() && store.is_notification_active() {
        println!("{NOTIFICATION_MESSAGE}");
    }
    // joining again does nothing
    store.join(football);

    tokio::time::sleep(store.notification_delay() + Duration::from_millis(100)).await;
    while let Ok(event) = events.try_recv() {
        println!("event: {event:?}");
    }
    println!(
        "joined: {:?}",
        store.my_competitions().iter().map(|c| c.title.as_str()).collect::<Vec<_>>()
    );
    Ok(())
}
