// In crates/core-types/src/lib.rs

pub mod error;
pub mod inputs;
pub mod rules;
pub mod types;

// Re-export the most important types for easy access from other crates.
pub use error::{Result, ValidationError};
pub use inputs::{
    CreateChallenge, CreatePosition, CreateRiskProfile, CreateSymbol, CreateTrade, CreateUser,
    CreateVault, IdInput, PositionIdInput, SymbolIdInput, UpdateChallenge, UpdatePosition,
    UpdateRiskProfile, UpdateSymbol, UpdateTrade, UpdateUser, UpdateVault, UserIdInput, Validate,
    WalletAddressInput,
};
pub use types::{Challenge, Position, RiskProfile, Role, Symbol, Trade, TradeSide, User, Vault};
