// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

// Field names serialize in camelCase so store bodies and JSON backups keep
// the interchange format of earlier exports (paidMonths, payType, ...).

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IncomeKind {
    Recurring,
    OneTime,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Income {
    pub name: String,
    pub source: String,
    #[serde(rename = "type")]
    pub kind: IncomeKind,
    pub amount: Decimal,
    /// Required for one-time income; ignored for recurring.
    pub date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    pub name: String,
    pub amount: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    pub payee: String,
    pub category: String,
    pub subcategory: String,
    pub payment_type: String,
    pub amount: Decimal,
    pub date: NaiveDate,
    #[serde(default)]
    pub notes: String,
    /// Itemized decomposition of `amount`. Allowed to diverge from the
    /// total; the remainder is recomputed for display, never stored.
    #[serde(default)]
    pub items: Vec<LineItem>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionStatus {
    Active,
    Cancelled,
}

impl SubscriptionStatus {
    fn default_active() -> Self {
        SubscriptionStatus::Active
    }

    pub fn is_active(self) -> bool {
        self == SubscriptionStatus::Active
    }

    pub fn toggled(self) -> Self {
        match self {
            SubscriptionStatus::Active => SubscriptionStatus::Cancelled,
            SubscriptionStatus::Cancelled => SubscriptionStatus::Active,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subscription {
    pub name: String,
    pub amount: Decimal,
    /// The day-of-month of this date is the billing day every month until
    /// cancelled.
    pub start_date: NaiveDate,
    #[serde(default)]
    pub payment_method: String,
    #[serde(default = "SubscriptionStatus::default_active")]
    pub status: SubscriptionStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PayType {
    #[default]
    Manual,
    Auto,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Budget {
    pub category: String,
    pub subcategory: String,
    pub amount: Decimal,
    #[serde(default)]
    pub payment_method: String,
    #[serde(default)]
    pub pay_type: PayType,
    /// Literal day-of-month comparison; a due day past the end of a short
    /// month is never matched that month.
    pub due_day: Option<u32>,
    /// The sole payment state machine: a budget is paid for a period iff
    /// its "YYYY-MM" key is in this set.
    #[serde(default)]
    pub paid_months: BTreeSet<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PointRule {
    pub category: String,
    pub subcategory: String,
    pub card: String,
    pub multiplier: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    pub name: String,
    pub birthday: NaiveDate,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentMethod {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub name: String,
    #[serde(default)]
    pub subcategories: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroceryItem {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShoppingList {
    pub name: String,
    #[serde(default)]
    pub items: Vec<LineItem>,
    pub created_at: NaiveDate,
}

impl ShoppingList {
    pub fn total(&self) -> Decimal {
        self.items.iter().map(|i| i.amount).sum()
    }
}
