use sea_orm::{ConnectionTrait, Statement, Value};
use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

/// The fixed UN taxonomy: (number, name, description, color).
const SDGS: &[(i32, &str, &str, &str)] = &[
    (1, "No Poverty", "End poverty in all its forms everywhere", "#E5243B"),
    (2, "Zero Hunger", "End hunger, achieve food security and improved nutrition", "#DDA63A"),
    (3, "Good Health", "Ensure healthy lives and promote well-being for all", "#4C9F38"),
    (4, "Quality Education", "Ensure inclusive and equitable quality education", "#C5192D"),
    (5, "Gender Equality", "Achieve gender equality and empower all women and girls", "#FF3A21"),
    (6, "Clean Water", "Ensure access to water and sanitation for all", "#26BDE2"),
    (7, "Clean Energy", "Ensure access to affordable, reliable, sustainable energy", "#FCC30B"),
    (8, "Good Jobs", "Promote inclusive and sustainable economic growth", "#A21942"),
    (9, "Innovation", "Build resilient infrastructure, promote sustainable industrialization", "#FD6925"),
    (10, "Reduced Inequalities", "Reduce inequality within and among countries", "#DD1367"),
    (11, "Sustainable Cities", "Make cities inclusive, safe, resilient and sustainable", "#FD9D24"),
    (12, "Responsible Consumption", "Ensure sustainable consumption and production patterns", "#BF8B2E"),
    (13, "Climate Action", "Take urgent action to combat climate change and its impacts", "#3F7E44"),
    (14, "Life Below Water", "Conserve and sustainably use the oceans, seas and marine resources", "#0A97D9"),
    (15, "Life On Land", "Sustainably manage forests, combat desertification", "#56C02B"),
    (16, "Peace & Justice", "Promote just, peaceful and inclusive societies", "#00689D"),
    (17, "Partnerships", "Revitalize the global partnership for sustainable development", "#19486A"),
];

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        for (number, name, description, color) in SDGS {
            let stmt = Statement::from_sql_and_values(
                db.get_database_backend(),
                "INSERT INTO sdgs (number, name, description, color) VALUES (?, ?, ?, ?) ON CONFLICT(number) DO NOTHING",
                vec![
                    Value::from(*number),
                    Value::from(*name),
                    Value::from(*description),
                    Value::from(*color),
                ],
            );
            db.execute(stmt).await?;
        }

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        for (number, ..) in SDGS {
            let stmt = Statement::from_sql_and_values(
                db.get_database_backend(),
                "DELETE FROM sdgs WHERE number = ?",
                vec![Value::from(*number)],
            );
            db.execute(stmt).await?;
        }
        Ok(())
    }
}
