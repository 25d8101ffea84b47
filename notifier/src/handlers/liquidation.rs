//! Liquidation event handler

use alloy::primitives::{Address, TxHash, U256};
use bigdecimal::BigDecimal;
use gravita_chain::SupportedChain;
use serde::Serialize;

use crate::{
    events::liquidation::LiquidationEvent,
    utils::{ltv_percentage, to_decimal, Ltv, DEBT_TOKEN_DECIMALS},
};

use super::{asset_info, HandlerContext, HandlerResult};

#[derive(Debug, Clone, Serialize)]
pub struct LiquidationRecord {
    pub chain: SupportedChain,
    pub tx_hash: Option<TxHash>,
    pub asset: Address,
    pub symbol: String,
    pub decimals: u8,
    pub price: U256,
    pub liquidated_debt: BigDecimal,
    pub debt_token_gas_compensation: BigDecimal,
    pub liquidated_coll: BigDecimal,
    pub coll_gas_compensation: BigDecimal,
    pub collateral_value: BigDecimal,
    pub ltv: Ltv,
}

/// Process a Liquidation event
///
/// Debt and debt token gas compensation are scaled by 18 decimals; liquidated
/// collateral and collateral gas compensation by the asset's decimals.
pub async fn handle(
    ctx: &HandlerContext,
    chain: SupportedChain,
    event: &LiquidationEvent,
) -> HandlerResult<LiquidationRecord> {
    let reader = ctx.reader(chain)?;
    let asset = asset_info::resolve(reader, event.asset).await?;

    let liquidated_debt = to_decimal(event.liquidated_debt, DEBT_TOKEN_DECIMALS);
    let debt_token_gas_compensation =
        to_decimal(event.debt_token_gas_compensation, DEBT_TOKEN_DECIMALS);
    let liquidated_coll = asset.collateral_amount(event.liquidated_coll);
    let coll_gas_compensation = asset.collateral_amount(event.coll_gas_compensation);

    let collateral_value = &liquidated_coll * &asset.price_decimal();
    let ltv = ltv_percentage(&liquidated_debt, &collateral_value);

    Ok(LiquidationRecord {
        chain,
        tx_hash: event.tx_hash,
        asset: event.asset,
        symbol: asset.symbol,
        decimals: asset.decimals,
        price: asset.price,
        liquidated_debt,
        debt_token_gas_compensation,
        liquidated_coll,
        coll_gas_compensation,
        collateral_value,
        ltv,
    })
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use alloy::primitives::address;

    use super::*;
    use crate::{
        error::AppError,
        handlers::testing::{context, units, MockReader},
    };

    const ASSET: Address = address!("5979D7b546E38E414F7E9822514be443A4800529");

    fn dec(value: &str) -> BigDecimal {
        BigDecimal::from_str(value).unwrap()
    }

    fn event(liquidated_debt: U256, liquidated_coll: U256) -> LiquidationEvent {
        LiquidationEvent {
            asset: ASSET,
            liquidated_debt,
            debt_token_gas_compensation: units(200, 18),
            liquidated_coll,
            coll_gas_compensation: U256::from(500_000u64),
            tx_hash: Some(TxHash::ZERO),
        }
    }

    #[tokio::test]
    async fn test_six_decimal_collateral_scenario() {
        // price 2.5, 100 units of collateral, 200 debt tokens
        let reader =
            MockReader::default().with_asset(ASSET, "wstETH", 6, U256::from(2_500_000u64));
        let (ctx, _) = context(reader);

        let liquidated_debt = U256::from(200_000_000_000_000_000_000u128);
        let record = handle(
            &ctx,
            SupportedChain::Ethereum,
            &event(liquidated_debt, U256::from(100_000_000u64)),
        )
        .await
        .unwrap();

        assert_eq!(record.liquidated_coll, dec("100"));
        assert_eq!(record.liquidated_debt, dec("200"));
        assert_eq!(record.collateral_value, dec("250"));
        assert_eq!(record.ltv, Ltv::Percent(dec("80")));
        assert_eq!(record.ltv.to_string(), "80.00%");
    }

    #[tokio::test]
    async fn test_debt_and_collateral_scales_are_not_swapped() {
        let reader =
            MockReader::default().with_asset(ASSET, "wstETH", 6, U256::from(2_500_000u64));
        let (ctx, _) = context(reader);

        let record = handle(
            &ctx,
            SupportedChain::Ethereum,
            &event(units(1, 18), units(1, 6)),
        )
        .await
        .unwrap();

        // 18 decimals on the debt side
        assert_eq!(record.liquidated_debt, dec("1"));
        assert_eq!(record.debt_token_gas_compensation, dec("200"));
        // asset decimals on the collateral side
        assert_eq!(record.liquidated_coll, dec("1"));
        assert_eq!(record.coll_gas_compensation, dec("0.5"));
    }

    #[tokio::test]
    async fn test_zero_collateral_gives_undefined_ltv() {
        let reader =
            MockReader::default().with_asset(ASSET, "wstETH", 6, U256::from(2_500_000u64));
        let (ctx, _) = context(reader);

        let record = handle(&ctx, SupportedChain::Ethereum, &event(units(5, 18), U256::ZERO))
            .await
            .unwrap();

        assert_eq!(record.collateral_value, dec("0"));
        assert_eq!(record.ltv, Ltv::Undefined);
    }

    #[tokio::test]
    async fn test_zero_price_gives_undefined_ltv() {
        let reader = MockReader::default().with_asset(ASSET, "wstETH", 18, U256::ZERO);
        let (ctx, _) = context(reader);

        let record = handle(&ctx, SupportedChain::Ethereum, &event(units(5, 18), units(1, 18)))
            .await
            .unwrap();

        assert_eq!(record.ltv, Ltv::Undefined);
    }

    #[tokio::test]
    async fn test_resolution_failure() {
        let reader = MockReader::default()
            .with_asset(ASSET, "wstETH", 6, U256::from(2_500_000u64))
            .with_broken_price(ASSET);
        let (ctx, _) = context(reader);

        let err = handle(&ctx, SupportedChain::Ethereum, &event(units(1, 18), units(1, 6)))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::AssetResolution { .. }));
    }
}
