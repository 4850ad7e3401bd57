pub use sea_orm_migration::prelude::*;

mod m20250301_000001_create_products;
mod m20250301_000002_create_variants;
mod m20250301_000003_create_images;
mod m20250301_000004_create_materials;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        // Order matters: variants reference products, images reference variants.
        vec![
            Box::new(m20250301_000001_create_products::Migration),
            Box::new(m20250301_000002_create_variants::Migration),
            Box::new(m20250301_000003_create_images::Migration),
            Box::new(m20250301_000004_create_materials::Migration),
        ]
    }
}
