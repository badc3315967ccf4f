// Walks one seeded delivery through an inspection and prints the list view
// before and after. Reads INSPECTION_VALIDATION and the basic auth pair from
// the environment or a local .env file.
use delivery_inspection::{
    config::InspectionConfig, filter::DeliveryFilter, gate::BasicAuthGate,
    repository::DeliveryRepository, service::InspectionService,
};
use std::sync::Arc;

fn print_list(service: &InspectionService, filter: &DeliveryFilter) {
    for delivery in service.deliveries(filter) {
        println!(
            "{}  {}  {:<28} {}",
            delivery.id(),
            delivery.delivery_date(),
            delivery.supplier(),
            delivery.status().label()
        );
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let config = InspectionConfig::from_env()?;
    let gate = BasicAuthGate::new(config.basic_auth.clone());
    tracing::info!(gate_enabled = gate.is_enabled(), policy = ?config.validation, "starting");

    let service = InspectionService::with_config(Arc::new(DeliveryRepository::seeded()?), &config);
    let filter = DeliveryFilter::new().on_date("2025-07-09".parse()?);

    println!("== {} ==", filter.date().map(|d| d.to_string()).unwrap_or_default());
    print_list(&service, &filter);

    let mut session = service.open_session("D001")?;
    session.receive_item("I001")?;
    session.receive_item("I002")?;
    session.set_received_quantity("I002", "2")?;
    let request = session.initiate_reject("I003")?;
    println!("{}: two dead on arrival", request.prompt());
    session.confirm_reject(&request.item_id, "Two dead on arrival")?;

    for item in session.delivery().items() {
        println!(
            "  {:<24} {:>4}/{:<4} {:<8} {}",
            item.name(),
            item.display_quantity(),
            item.quantity_ordered(),
            item.unit(),
            item.status()
        );
    }

    let finalized = service.finalize(session)?;
    println!("D001 is now {}", finalized.status.label());

    println!("== {} ==", filter.date().map(|d| d.to_string()).unwrap_or_default());
    print_list(&service, &filter);

    Ok(())
}
