use chrono::{Duration, Utc};
use pharmacy_inventory_api::{
    config::AppConfig,
    db::{create_orm_conn, run_migrations},
    dto::{auth::NewUser, inventory::NewInventoryItem, products::NewProduct},
    error::AppError,
    services::{auth_service, inventory_service, lookup_service, product_service},
    state::AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;

    let orm = create_orm_conn(&config.database_url, 1).await?;
    // Ensure migrations are applied.
    run_migrations(&orm).await?;
    let state = AppState::new(orm, config.jwt_secret.as_str());

    ensure_user(&state, "admin", "admin123", "Administration", "admin").await?;
    ensure_user(&state, "pharmacist", "pharma123", "Dispensary", "pharmacist").await?;
    let manufacturers = seed_manufacturers(&state).await?;
    seed_customers(&state).await?;
    seed_products(&state, &manufacturers).await?;

    println!("Seed completed.");
    Ok(())
}

async fn ensure_user(
    state: &AppState,
    user_id: &str,
    password: &str,
    department: &str,
    user_type: &str,
) -> anyhow::Result<()> {
    let user = NewUser {
        user_id: user_id.to_string(),
        password: password.to_string(),
        department: department.to_string(),
        user_type: user_type.to_string(),
        status: 1,
    };
    match auth_service::register_user(state, user).await {
        Ok(_) => println!("Created user {user_id} (type={user_type})"),
        Err(AppError::Conflict(_)) => println!("User {user_id} already exists"),
        Err(err) => return Err(err.into()),
    }
    Ok(())
}

async fn seed_manufacturers(state: &AppState) -> anyhow::Result<Vec<i32>> {
    for name in ["Pfizer", "GlaxoSmithKline", "Teva", "Apotex"] {
        match lookup_service::create_manufacturer(state, name.to_string()).await {
            Ok(_) | Err(AppError::Conflict(_)) => {}
            Err(err) => return Err(err.into()),
        }
    }
    let listed = lookup_service::list_manufacturers(state).await?;
    println!("Seeded manufacturers");
    Ok(listed
        .data
        .unwrap_or_default()
        .into_iter()
        .map(|m| m.id)
        .collect())
}

async fn seed_customers(state: &AppState) -> anyhow::Result<()> {
    let existing = lookup_service::list_customers(state)
        .await?
        .data
        .unwrap_or_default();
    if !existing.is_empty() {
        return Ok(());
    }
    for name in ["Jane Doe", "John Smith", "Mary Major"] {
        lookup_service::create_customer(state, name.to_string()).await?;
    }
    println!("Seeded customers");
    Ok(())
}

async fn seed_products(state: &AppState, manufacturers: &[i32]) -> anyhow::Result<()> {
    let Some(&first) = manufacturers.first() else {
        return Ok(());
    };
    let second = manufacturers.get(1).copied().unwrap_or(first);

    // (name, generic, strength, form, route, ATC, prescription, DIN)
    let products = [
        ("Amoxil", "Amoxicillin", "500 mg", "Capsule", "Oral", "J01CA04", true, "02238830"),
        ("Tylenol", "Paracetamol", "500 mg", "Tablet", "Oral", "N02BE01", false, "00559407"),
        ("Ventolin", "Salbutamol", "100 mcg", "Inhaler", "Inhalation", "R03AC02", true, "02213486"),
        ("Advil", "Ibuprofen", "200 mg", "Tablet", "Oral", "M01AE01", false, "00441643"),
    ];

    for (i, row) in products.into_iter().enumerate() {
        let (name, generic, strength, form, route, atc, rx, din) = row;
        let manufacturer_id = if i % 2 == 0 { first } else { second };
        let product = NewProduct {
            product_name: name.to_string(),
            generic_name: generic.to_string(),
            strength: strength.to_string(),
            pharmaceutical_form: form.to_string(),
            route_of_administration: route.to_string(),
            manufacturer_id,
            atc_code: atc.to_string(),
            description: String::new(),
            prescription_required: rx,
            drug_identification_number: din.to_string(),
        };
        let created = match product_service::create_product(state, product).await {
            Ok(resp) => resp.data,
            Err(AppError::Conflict(_)) => continue,
            Err(err) => return Err(err.into()),
        };
        if let Some(product) = created {
            let item = NewInventoryItem {
                product_id: product.id,
                batch_number: format!("{}-001", din),
                expiry_date: (Utc::now() + Duration::days(365)).date_naive(),
                quantity_in_stock: 100,
                location: Some("Shelf A".to_string()),
                cost_price: 2.5,
                selling_price: 4.0,
            };
            inventory_service::create_inventory_item(state, item).await?;
        }
    }

    println!("Seeded products and inventory");
    Ok(())
}
