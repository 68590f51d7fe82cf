use model::entities::classification::ClassificationType;
use model::entities::setting::keys;
use sea_orm::ActiveEnum;
use sea_orm_migration::prelude::*;

use crate::m20250101_000001_create_ledger_tables::{Classifications, Settings};

#[derive(DeriveMigrationName)]
pub struct Migration;

use ClassificationType::*;

/// Default taxonomy of a small manufacturing business.
const DEFAULT_CLASSIFICATIONS: &[(&str, ClassificationType)] = &[
    // Production, fixed
    ("FACTORY WAGES", FixedCost),
    ("RENT / INSURANCE", FixedCost),
    ("MACHINE / TOOL MAINTENANCE", FixedCost),
    ("CONSUMABLES", FixedCost),
    ("ON-SITE MEALS", FixedCost),
    ("WORKPLACE SAFETY", FixedCost),
    ("MEAL VOUCHERS", FixedCost),
    ("TRANSPORT VOUCHERS", FixedCost),
    // Production, variable
    ("RAW MATERIAL", VariableCost),
    ("ANODIZING", VariableCost),
    ("COMPONENTS", VariableCost),
    ("GALVANIZING", VariableCost),
    ("PACKAGING MATERIAL", VariableCost),
    ("EXTERNAL PAINTING", VariableCost),
    ("INTERNAL PAINTING", VariableCost),
    // Administrative, fixed
    ("CLEANING", FixedExpense),
    ("LABOR LAWSUITS", FixedExpense),
    ("HEALTH PLAN", FixedExpense),
    ("NOTARY / LICENSES", FixedExpense),
    ("CATALOGS", FixedExpense),
    ("ACCOUNTING", FixedExpense),
    ("HIRING EXPENSES", FixedExpense),
    ("DISMISSAL EXPENSES", FixedExpense),
    ("FAIRS / EXHIBITIONS / ASSOCIATIONS", FixedExpense),
    ("BUILDING MAINTENANCE", FixedExpense),
    ("OFFICE SUPPLIES", FixedExpense),
    ("TRAVEL / LODGING", FixedExpense),
    ("OFFICE WAGES", FixedExpense),
    ("OUTSOURCED SERVICES", FixedExpense),
    ("MISCELLANEOUS SERVICES", FixedExpense),
    ("UNION FEES", FixedExpense),
    ("SYSTEMS", FixedExpense),
    ("WEBSITE", FixedExpense),
    ("PHONE / COMMUNICATION", FixedExpense),
    ("TRAINING", FixedExpense),
    ("MEALS", FixedExpense),
    // Variable expenses
    ("SALES COMMISSION", VariableExpense),
    ("FREIGHT", VariableExpense),
    ("COURIER / POSTAGE", VariableExpense),
    // Taxes
    ("FGTS", Tax),
    ("COFINS+PIS+IPI", Tax),
    ("CSLL", Tax),
    ("DARF", Tax),
    ("DIFAL", Tax),
    ("GPS", Tax),
    ("ICMS", Tax),
    ("INSS", Tax),
    ("IRPJ", Tax),
    ("IRRF", Tax),
    // Financing
    ("AMORTIZATION", Financial),
    ("CAPITAL CONTRIBUTION", Financial),
    ("DIVIDENDS", Financial),
    ("LOAN", Financial),
    ("FINANCING", Financial),
    ("INTEREST", Financial),
    ("BANK FEES", Financial),
    // Investments
    ("EXPANSION / CONSTRUCTION", Investment),
    ("MACHINE PARTS", Investment),
    ("TOOLS / FIXTURES", Investment),
    ("FIXED ASSETS", Investment),
    ("MACHINERY", Investment),
    ("FURNITURE", Investment),
    ("STANDARDS", Investment),
    ("INVESTMENT YIELD", Investment),
    ("SOFTWARE", Investment),
    ("TESTING / DEVELOPMENT", Investment),
    ("IT", Investment),
    // Revenue
    ("PRODUCT SALES", Revenue),
];

const DEFAULT_SETTINGS: &[(&str, &str, &str)] = &[
    (keys::CASH_POLICY_MINIMUM, "55000", "Lowest acceptable cash balance"),
    (keys::CASH_POLICY_RETURN_POINT, "100000", "Target balance after a rebalancing transfer"),
    (keys::CASH_POLICY_MAXIMUM, "355000", "Highest acceptable cash balance"),
    (keys::OPENING_BALANCE, "0", "Balance at the start of the tracked year"),
    (keys::CURRENT_YEAR, "2025", "Year shown by default"),
];

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let mut classifications = Query::insert();
        classifications.into_table(Classifications::Table).columns([
            Classifications::Name,
            Classifications::Kind,
            Classifications::DefaultCategory,
        ]);
        for (name, kind) in DEFAULT_CLASSIFICATIONS {
            classifications
                .values([
                    (*name).into(),
                    kind.to_value().into(),
                    kind.default_category().to_value().into(),
                ])
                .map_err(|e| DbErr::Custom(e.to_string()))?;
        }
        manager.exec_stmt(classifications).await?;

        let mut settings = Query::insert();
        settings
            .into_table(Settings::Table)
            .columns([Settings::Key, Settings::Value, Settings::Description]);
        for (key, value, description) in DEFAULT_SETTINGS {
            settings
                .values([(*key).into(), (*value).into(), (*description).into()])
                .map_err(|e| DbErr::Custom(e.to_string()))?;
        }
        manager.exec_stmt(settings).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let keys: Vec<&str> = DEFAULT_SETTINGS.iter().map(|(key, _, _)| *key).collect();
        manager
            .exec_stmt(
                Query::delete()
                    .from_table(Settings::Table)
                    .and_where(Expr::col(Settings::Key).is_in(keys))
                    .to_owned(),
            )
            .await?;

        let names: Vec<&str> = DEFAULT_CLASSIFICATIONS.iter().map(|(name, _)| *name).collect();
        manager
            .exec_stmt(
                Query::delete()
                    .from_table(Classifications::Table)
                    .and_where(Expr::col(Classifications::Name).is_in(names))
                    .to_owned(),
            )
            .await?;

        Ok(())
    }
}
