//! Organization seeding
//!
//! Inserts the base organization catalog through the provider.
//! Run once per environment: `cargo run --bin seed`

use serde::Serialize;
use sirecovip_server::{Config, ProviderClient, init_logger};

#[derive(Serialize)]
struct OrganizationSeed {
    name: &'static str,
    contact: &'static str,
    phone: &'static str,
    address: &'static str,
    status: &'static str,
}

const BASE_ORGANIZATIONS: &[OrganizationSeed] = &[
    OrganizationSeed {
        name: "Unión de Comerciantes Centro Histórico",
        contact: "Juan Pérez",
        phone: "442-111-2222",
        address: "Av. Corregidora 12, Centro",
        status: "activa",
    },
    OrganizationSeed {
        name: "Tianguis Nocturno Felipe Carrillo",
        contact: "María López",
        phone: "442-333-4444",
        address: "Calle Espuelas s/n",
        status: "activa",
    },
    OrganizationSeed {
        name: "Mercado Sobre Ruedas Satélite",
        contact: "Pedro Sánchez",
        phone: "442-555-6666",
        address: "Av. de la Luz",
        status: "activa",
    },
];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    init_logger();

    let config = Config::from_env()?;
    let provider = ProviderClient::new(&config.provider_url, &config.service_key)?;

    tracing::info!("🌱 Sembrando organizaciones...");

    let created: Vec<shared::Organization> = provider
        .from("organizations")
        .insert_many(BASE_ORGANIZATIONS)
        .await?;

    tracing::info!("✅ Organizaciones creadas con éxito: {}", created.len());
    for org in &created {
        tracing::info!(id = %org.id, name = %org.name, "seeded");
    }

    Ok(())
}
