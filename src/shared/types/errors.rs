use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BillingError {
    #[error("Discount percentage {0} is outside the range 0..=100")]
    InvalidDiscountRange(Decimal),

    #[error("Exchange rate is zero; inverse ratio is undefined")]
    DivisionByZeroRate,

    #[error("Account {account_id} references unknown cost center {cost_center_id}")]
    MissingCostCenterReference {
        account_id: String,
        cost_center_id: String,
    },

    #[error("Not found: {entity} with {field}={value}")]
    NotFound {
        entity: &'static str,
        field: &'static str,
        value: String,
    },

    #[error("Validation: {0}")]
    Validation(String),
}

impl BillingError {
    /// Whether the condition still allows a complete report to be produced.
    pub fn is_reportable(&self) -> bool {
        matches!(
            self,
            BillingError::DivisionByZeroRate | BillingError::MissingCostCenterReference { .. }
        )
    }
}

pub type BillingResult<T> = Result<T, BillingError>;

#[derive(Debug, Error)]
pub enum InfraError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(#[from] toml::de::Error),

    #[error("Logging setup failed: {0}")]
    Logging(#[from] tracing_subscriber::util::TryInitError),
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Billing(#[from] BillingError),

    #[error(transparent)]
    Infra(#[from] InfraError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn display_messages() {
        assert_eq!(
            BillingError::InvalidDiscountRange(dec!(120)).to_string(),
            "Discount percentage 120 is outside the range 0..=100"
        );
        let err = BillingError::NotFound {
            entity: "Customer",
            field: "id",
            value: "acme".into(),
        };
        assert_eq!(err.to_string(), "Not found: Customer with id=acme");
    }

    #[test]
    fn reportable_conditions() {
        assert!(BillingError::DivisionByZeroRate.is_reportable());
        assert!(BillingError::MissingCostCenterReference {
            account_id: "a".into(),
            cost_center_id: "cc".into(),
        }
        .is_reportable());
        assert!(!BillingError::InvalidDiscountRange(dec!(-1)).is_reportable());
        assert!(!BillingError::Validation("bad".into()).is_reportable());
    }

    #[test]
    fn app_error_wraps_layers() {
        let app: AppError = BillingError::DivisionByZeroRate.into();
        assert!(matches!(app, AppError::Billing(_)));
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let app: AppError = InfraError::from(io).into();
        assert_eq!(app.to_string(), "I/O error: missing");
    }
}
