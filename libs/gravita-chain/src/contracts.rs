//! Gravita contract bindings
//!
//! Only the functions and events the notifier needs are declared. Parameter
//! names do not affect selectors or topic hashes.

use alloy::sol;

sol! {
    #[sol(rpc)]
    interface IERC20 {
        function symbol() external view returns (string);
        function decimals() external view returns (uint8);
    }
}

sol! {
    #[sol(rpc)]
    interface IPriceFeed {
        function fetchPrice(address token) external view returns (uint256);
    }
}

sol! {
    /// `Vessels` is the public getter of `mapping(address => mapping(address => Vessel))`
    #[sol(rpc)]
    interface IVesselManager {
        function Vessels(address borrower, address asset)
            external
            view
            returns (uint256 debt, uint256 coll, uint256 stake, uint8 status, uint128 arrayIndex);
    }
}

sol! {
    interface IBorrowerOperations {
        event VesselCreated(address indexed asset, address indexed borrower, uint256 arrayIndex);
    }
}

sol! {
    interface IVesselManagerOperations {
        event Liquidation(
            address indexed asset,
            uint256 liquidatedDebt,
            uint256 liquidatedColl,
            uint256 collGasCompensation,
            uint256 debtTokenGasCompensation
        );

        event Redemption(
            address indexed asset,
            uint256 attemptedDebtAmount,
            uint256 actualDebtAmount,
            uint256 collSent,
            uint256 collFee
        );
    }
}

#[cfg(test)]
mod tests {
    use alloy::{primitives::keccak256, sol_types::SolEvent};

    use super::*;

    #[test]
    fn test_event_signatures() {
        assert_eq!(
            IBorrowerOperations::VesselCreated::SIGNATURE,
            "VesselCreated(address,address,uint256)"
        );
        assert_eq!(
            IVesselManagerOperations::Liquidation::SIGNATURE,
            "Liquidation(address,uint256,uint256,uint256,uint256)"
        );
        assert_eq!(
            IVesselManagerOperations::Redemption::SIGNATURE_HASH,
            keccak256("Redemption(address,uint256,uint256,uint256,uint256)")
        );
    }
}
