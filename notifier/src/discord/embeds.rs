//! Discord embed builders for enriched records

use alloy::primitives::TxHash;
use bigdecimal::BigDecimal;
use chrono::Utc;
use gravita_chain::SupportedChain;
use serde::Serialize;

use crate::{
    handlers::{
        liquidation::LiquidationRecord, redemption::RedemptionRecord,
        vessel_created::VesselCreatedRecord, EnrichedRecord,
    },
    utils::{format_amount, to_decimal},
};

/// Symbol of the protocol's debt token
const DEBT_SYMBOL: &str = "GRAI";
const FOOTER: &str = "Gravita Protocol";

pub mod colors {
    pub const VESSEL_CREATED: u32 = 0x2ECC71;
    pub const LIQUIDATION: u32 = 0xE74C3C;
    pub const REDEMPTION: u32 = 0xF39C12;
}

/// Rich message payload, serialised as a Discord embed object
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Embed {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    pub color: u32,
    pub fields: Vec<EmbedField>,
    pub footer: EmbedFooter,
    pub timestamp: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmbedField {
    pub name: String,
    pub value: String,
    pub inline: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmbedFooter {
    pub text: String,
}

impl Embed {
    fn new(title: &str, color: u32, chain: SupportedChain, tx_hash: Option<TxHash>) -> Self {
        Self {
            title: format!("{title} on {}", chain_label(chain)),
            url: tx_hash.map(|hash| chain.tx_url(&hash)),
            color,
            fields: Vec::new(),
            footer: EmbedFooter {
                text: FOOTER.to_string(),
            },
            timestamp: Utc::now().to_rfc3339(),
        }
    }

    fn field(mut self, name: &str, value: impl Into<String>, inline: bool) -> Self {
        self.fields.push(EmbedField {
            name: name.to_string(),
            value: value.into(),
            inline,
        });
        self
    }

    /// Value of the first field called `name`
    #[cfg(test)]
    pub fn field_value(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|field| field.name == name)
            .map(|field| field.value.as_str())
    }
}

fn chain_label(chain: SupportedChain) -> &'static str {
    match chain {
        SupportedChain::Ethereum => "Ethereum",
        SupportedChain::Arbitrum => "Arbitrum",
    }
}

fn debt(value: &BigDecimal) -> String {
    format!("{} {DEBT_SYMBOL}", format_amount(value, 2))
}

fn collateral(value: &BigDecimal, symbol: &str) -> String {
    format!("{} {symbol}", format_amount(value, 4))
}

fn usd(value: &BigDecimal) -> String {
    format!("${}", format_amount(value, 2))
}

pub fn vessel_created_embed(record: &VesselCreatedRecord) -> Embed {
    let price = to_decimal(record.price, record.decimals);

    Embed::new(
        "New Vessel",
        colors::VESSEL_CREATED,
        record.chain,
        record.tx_hash,
    )
    .field("Asset", format!("{} (`{}`)", record.symbol, record.asset), false)
    .field("Borrower", format!("`{}`", record.borrower), false)
    .field("Debt", debt(&record.debt), true)
    .field("Collateral", collateral(&record.collateral, &record.symbol), true)
    .field("Collateral Value", usd(&record.collateral_value), true)
    .field("Price", usd(&price), true)
    .field("LTV", record.ltv.to_string(), true)
}

pub fn liquidation_embed(record: &LiquidationRecord) -> Embed {
    let price = to_decimal(record.price, record.decimals);

    Embed::new(
        "Liquidation",
        colors::LIQUIDATION,
        record.chain,
        record.tx_hash,
    )
    .field("Asset", format!("{} (`{}`)", record.symbol, record.asset), false)
    .field("Liquidated Debt", debt(&record.liquidated_debt), true)
    .field(
        "Liquidated Collateral",
        collateral(&record.liquidated_coll, &record.symbol),
        true,
    )
    .field("Collateral Value", usd(&record.collateral_value), true)
    .field("Debt Gas Compensation", debt(&record.debt_token_gas_compensation), true)
    .field(
        "Collateral Gas Compensation",
        collateral(&record.coll_gas_compensation, &record.symbol),
        true,
    )
    .field("Price", usd(&price), true)
    .field("LTV", record.ltv.to_string(), true)
}

pub fn redemption_embed(record: &RedemptionRecord) -> Embed {
    let price = to_decimal(record.price, record.decimals);

    Embed::new(
        "Redemption",
        colors::REDEMPTION,
        record.chain,
        record.tx_hash,
    )
    .field("Asset", format!("{} (`{}`)", record.symbol, record.asset), false)
    .field("Attempted Debt", debt(&record.attempted_debt_amount), true)
    .field("Actual Debt", debt(&record.actual_debt_amount), true)
    .field("Collateral Sent", collateral(&record.coll_sent, &record.symbol), true)
    .field("Collateral Fee", collateral(&record.coll_fee, &record.symbol), true)
    .field("Price", usd(&price), true)
}

/// Build the embed for any enriched record
pub fn build_embed(record: &EnrichedRecord) -> Embed {
    match record {
        EnrichedRecord::VesselCreated(record) => vessel_created_embed(record),
        EnrichedRecord::Liquidation(record) => liquidation_embed(record),
        EnrichedRecord::Redemption(record) => redemption_embed(record),
    }
}
