use std::collections::HashMap;

use crate::models::LeaveBalance;

/// Remaining leave days per employee.
///
/// Employees without an entry hold the configured default balance.
#[derive(Debug, Clone)]
pub struct LeaveBalances {
    default: LeaveBalance,
    balances: HashMap<String, LeaveBalance>,
}

impl LeaveBalances {
    /// Creates an empty ledger with the given default balance.
    pub fn new(default: LeaveBalance) -> Self {
        Self {
            default,
            balances: HashMap::new(),
        }
    }

    /// Returns the balance for an employee.
    pub fn get(&self, employee_id: &str) -> LeaveBalance {
        self.balances
            .get(employee_id)
            .copied()
            .unwrap_or(self.default)
    }

    /// Stores the balance for an employee.
    pub fn set(&mut self, employee_id: &str, balance: LeaveBalance) {
        self.balances.insert(employee_id.to_string(), balance);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_employee_gets_default() {
        let default = LeaveBalance {
            annual: 14,
            sick: 7,
            casual: 7,
        };
        let mut ledger = LeaveBalances::new(default);
        assert_eq!(ledger.get("EMP001"), default);

        let reduced = LeaveBalance { annual: 9, ..default };
        ledger.set("EMP001", reduced);
        assert_eq!(ledger.get("EMP001").annual, 9);
        assert_eq!(ledger.get("EMP002").annual, 14);
    }
}
