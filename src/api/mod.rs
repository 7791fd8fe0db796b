use serde::Deserialize;
use utoipa::IntoParams;

pub mod benefit;
pub mod department;
pub mod employee;
pub mod employee_benefit;
pub mod payroll;

/// Offset pagination, shared by every `/paginated` endpoint.
#[derive(Debug, Deserialize, IntoParams)]
pub struct PageQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

impl PageQuery {
    pub fn page(&self) -> u32 {
        self.page.unwrap_or(1).max(1)
    }

    pub fn limit(&self) -> u32 {
        self.limit.unwrap_or(10).max(1)
    }

    pub fn offset(&self) -> i64 {
        ((self.page() - 1) * self.limit()) as i64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offset_is_page_minus_one_times_limit() {
        let q = PageQuery {
            page: Some(3),
            limit: Some(10),
        };
        assert_eq!(q.offset(), 20);
    }

    #[test]
    fn page_and_limit_are_floored_at_one() {
        let q = PageQuery {
            page: Some(0),
            limit: Some(0),
        };
        assert_eq!(q.page(), 1);
        assert_eq!(q.limit(), 1);
        assert_eq!(q.offset(), 0);
    }

    #[test]
    fn defaults_are_first_page_of_ten() {
        let q = PageQuery {
            page: None,
            limit: None,
        };
        assert_eq!(q.page(), 1);
        assert_eq!(q.limit(), 10);
    }
}
