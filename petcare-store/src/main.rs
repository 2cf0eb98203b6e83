use anyhow::Context;
use petcare_store::services::ReservationFilter;
use petcare_store::{Config, StoreState, setup_environment};

fn main() -> anyhow::Result<()> {
    // 1. Environment (dotenv, work dir, logging)
    setup_environment().context("failed to set up environment")?;

    tracing::info!("PetCare store starting...");

    // 2. Configuration
    let config = Config::from_env();

    // 3. Store
    let state = StoreState::open(&config)
        .with_context(|| format!("failed to open store at {}", config.db_path().display()))?;

    if config.seed_demo && state.seeder().seed_if_empty()? {
        tracing::info!("Demo data loaded");
    }

    // 4. Primary hotel summary
    let dashboard = state.dashboard();
    let Some(hotel) = dashboard.primary_hotel() else {
        tracing::info!("No hotels registered");
        return Ok(());
    };

    let (views, totals) = dashboard.hotel_dashboard(&hotel.id, &ReservationFilter::default());
    tracing::info!(
        hotel = %hotel.name,
        total = totals.total,
        pending = totals.pending,
        checked_in = totals.checked_in,
        "Hotel summary"
    );
    for view in views {
        tracing::info!(
            id = %view.reservation.id,
            pet = %view.pet_name,
            guardian = %view.user_name,
            checkin = %view.reservation.checkin_date,
            checkout = %view.reservation.checkout_date,
            status = %view.reservation.status.label(),
            "Reservation"
        );
    }

    Ok(())
}
