use serde::Deserialize;
use validator::Validate;

#[derive(Debug, Default, Deserialize, Validate)]
pub struct PaginationParams {
    #[validate(range(min = 1, message = "Limit must be positive"))]
    pub limit: Option<i64>,
    #[validate(range(min = 0, message = "Offset cannot be negative"))]
    pub offset: Option<i64>,
}

impl PaginationParams {
    pub fn limit(&self) -> i64 {
        self.limit.unwrap_or(10)
    }

    pub fn offset(&self) -> i64 {
        self.offset.unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_ten_and_zero() {
        let params = PaginationParams::default();
        assert_eq!(params.limit(), 10);
        assert_eq!(params.offset(), 0);
    }

    #[test]
    fn supplied_values_win() {
        let params = PaginationParams {
            limit: Some(25),
            offset: Some(50),
        };
        assert_eq!(params.limit(), 25);
        assert_eq!(params.offset(), 50);
    }

    #[test]
    fn zero_limit_fails_validation() {
        let params = PaginationParams {
            limit: Some(0),
            offset: None,
        };
        assert!(params.validate().is_err());
    }

    #[test]
    fn negative_offset_fails_validation() {
        let params = PaginationParams {
            limit: None,
            offset: Some(-1),
        };
        assert!(params.validate().is_err());
    }
}
