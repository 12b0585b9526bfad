// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Ledger rules: how a transaction moves an employee's balances, and how a
//! day's transactions fold into the today view.

use crate::error::DomainError;
use crate::money::Money;
use crate::types::{Balances, PaymentStatus, TodayView, TransactionType};

/// The change a single transaction makes to an employee's balances.
///
/// | type      | balance | bonuses | deductions |
/// |-----------|---------|---------|------------|
/// | payment   | −amount | 0       | 0          |
/// | deduction | −amount | 0       | +amount    |
/// | bonus     | +amount | +amount | 0          |
///
/// Accumulator changes are never negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BalanceEffect {
    pub balance_change: Money,
    pub bonus_change: Money,
    pub deduction_change: Money,
}

impl BalanceEffect {
    /// Computes the effect of a transaction of the given type and amount.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::BalanceOverflow` if the amount cannot be negated.
    pub fn for_transaction(
        transaction_type: TransactionType,
        amount: Money,
    ) -> Result<Self, DomainError> {
        let outflow = || {
            amount.checked_neg().ok_or_else(|| DomainError::BalanceOverflow {
                operation: format!("negating {transaction_type} amount {amount}"),
            })
        };

        Ok(match transaction_type {
            TransactionType::Payment => Self {
                balance_change: outflow()?,
                bonus_change: Money::ZERO,
                deduction_change: Money::ZERO,
            },
            TransactionType::Deduction => Self {
                balance_change: outflow()?,
                bonus_change: Money::ZERO,
                deduction_change: amount,
            },
            TransactionType::Bonus => Self {
                balance_change: amount,
                bonus_change: amount,
                deduction_change: Money::ZERO,
            },
        })
    }

    /// Applies this effect to a set of balances.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::BalanceOverflow` if any figure leaves the
    /// representable range.
    pub fn apply_to(&self, balances: &Balances) -> Result<Balances, DomainError> {
        let overflow = |field: &str| DomainError::BalanceOverflow {
            operation: format!("updating {field}"),
        };

        Ok(Balances {
            current_balance: balances
                .current_balance
                .checked_add(self.balance_change)
                .ok_or_else(|| overflow("current_balance"))?,
            total_bonuses: balances
                .total_bonuses
                .checked_add(self.bonus_change)
                .ok_or_else(|| overflow("total_bonuses"))?,
            total_deductions: balances
                .total_deductions
                .checked_add(self.deduction_change)
                .ok_or_else(|| overflow("total_deductions"))?,
        })
    }
}

/// Balances after settlement: the running balance is discarded, the audit
/// accumulators are kept as they are.
#[must_use]
pub const fn settle_balances(balances: &Balances) -> Balances {
    Balances {
        current_balance: Money::ZERO,
        total_bonuses: balances.total_bonuses,
        total_deductions: balances.total_deductions,
    }
}

/// The payment status an account carries after settlement.
pub const SETTLED_STATUS: PaymentStatus = PaymentStatus::Paid;

impl TodayView {
    /// Adds one of the day's transactions to the matching sum.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::BalanceOverflow` if a sum overflows.
    pub fn record_transaction(
        &mut self,
        transaction_type: TransactionType,
        amount: Money,
    ) -> Result<(), DomainError> {
        let slot: &mut Money = match transaction_type {
            TransactionType::Payment => &mut self.withdrawals,
            TransactionType::Bonus => &mut self.bonuses,
            TransactionType::Deduction => &mut self.deductions,
        };

        *slot = slot
            .checked_add(amount)
            .ok_or_else(|| DomainError::BalanceOverflow {
                operation: format!("summing today's {transaction_type} transactions"),
            })?;
        Ok(())
    }
}
