// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{Budget, Expense, Income, IncomeKind, Subscription};
use crate::store::Document;
use crate::utils::date_in_prefix;
use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;

/// Budgeted-vs-actual rollups for a month or year. Everything here is
/// pure and recomputed in full from the current snapshot; there is no
/// incremental maintenance.

pub const SUBSCRIPTIONS_LABEL: &str = "Subscriptions";

pub fn active_subscription_cost(subscriptions: &[Document<Subscription>]) -> Decimal {
    subscriptions
        .iter()
        .filter(|s| s.data.status.is_active())
        .map(|s| s.data.amount)
        .sum()
}

#[derive(Debug, Clone, Serialize)]
pub struct MonthlyOverview {
    pub income: Decimal,
    pub expenses: Decimal,
    pub net: Decimal,
}

/// Income counts every recurring entry regardless of date plus one-time
/// entries dated in the month. Expenses include the active subscription
/// cost, which is always treated as paid.
pub fn monthly_overview(
    income: &[Document<Income>],
    expenses: &[Document<Expense>],
    subscriptions: &[Document<Subscription>],
    month: &str,
) -> MonthlyOverview {
    let total_income: Decimal = income
        .iter()
        .filter(|i| match i.data.kind {
            IncomeKind::Recurring => true,
            IncomeKind::OneTime => i
                .data
                .date
                .map(|d| date_in_prefix(d, month))
                .unwrap_or(false),
        })
        .map(|i| i.data.amount)
        .sum();
    let month_expenses: Decimal = expenses
        .iter()
        .filter(|e| date_in_prefix(e.data.date, month))
        .map(|e| e.data.amount)
        .sum();
    let total_expenses = month_expenses + active_subscription_cost(subscriptions);
    MonthlyOverview {
        income: total_income,
        expenses: total_expenses,
        net: total_income - total_expenses,
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct BudgetRow {
    pub category: String,
    pub subcategory: String,
    pub budgeted: Decimal,
    pub actual: Decimal,
}

#[derive(Debug, Clone, Serialize)]
pub struct BudgetReport {
    pub rows: Vec<BudgetRow>,
    pub total_budgeted: Decimal,
    pub total_actual: Decimal,
}

/// One row per budget (actual = matching expenses in the month by
/// category/subcategory string equality) plus a synthetic row for all
/// active subscriptions, which are budgeted and spent at the same cost.
/// Totals are column sums including the synthetic row.
pub fn budget_vs_actual(
    budgets: &[Document<Budget>],
    subscriptions: &[Document<Subscription>],
    expenses: &[Document<Expense>],
    month: &str,
) -> BudgetReport {
    let mut rows: Vec<BudgetRow> = budgets
        .iter()
        .map(|b| {
            let actual = expenses
                .iter()
                .filter(|e| {
                    date_in_prefix(e.data.date, month)
                        && e.data.category == b.data.category
                        && e.data.subcategory == b.data.subcategory
                })
                .map(|e| e.data.amount)
                .sum();
            BudgetRow {
                category: b.data.category.clone(),
                subcategory: b.data.subcategory.clone(),
                budgeted: b.data.amount,
                actual,
            }
        })
        .collect();

    let sub_cost = active_subscription_cost(subscriptions);
    if sub_cost > Decimal::ZERO {
        rows.push(BudgetRow {
            category: SUBSCRIPTIONS_LABEL.to_string(),
            subcategory: "Recurring".to_string(),
            budgeted: sub_cost,
            actual: sub_cost,
        });
    }

    let total_budgeted = rows.iter().map(|r| r.budgeted).sum();
    let total_actual = rows.iter().map(|r| r.actual).sum();
    BudgetReport {
        rows,
        total_budgeted,
        total_actual,
    }
}

/// Spend per category for any "YYYY" or "YYYY-MM" date prefix, largest
/// first.
pub fn spend_by_category(expenses: &[Document<Expense>], prefix: &str) -> Vec<(String, Decimal)> {
    let mut agg: BTreeMap<String, Decimal> = BTreeMap::new();
    for e in expenses
        .iter()
        .filter(|e| date_in_prefix(e.data.date, prefix))
    {
        *agg.entry(e.data.category.clone()).or_insert(Decimal::ZERO) += e.data.amount;
    }
    sorted_desc(agg)
}

/// Monthly category spend with the active subscription cost folded into
/// a synthetic "Subscriptions" bucket.
pub fn monthly_category_spend(
    expenses: &[Document<Expense>],
    subscriptions: &[Document<Subscription>],
    month: &str,
) -> Vec<(String, Decimal)> {
    let mut agg: BTreeMap<String, Decimal> = BTreeMap::new();
    for e in expenses
        .iter()
        .filter(|e| date_in_prefix(e.data.date, month))
    {
        *agg.entry(e.data.category.clone()).or_insert(Decimal::ZERO) += e.data.amount;
    }
    let sub_cost = active_subscription_cost(subscriptions);
    if sub_cost > Decimal::ZERO {
        *agg.entry(SUBSCRIPTIONS_LABEL.to_string())
            .or_insert(Decimal::ZERO) += sub_cost;
    }
    sorted_desc(agg)
}

pub fn spend_by_payment_type(
    expenses: &[Document<Expense>],
    month: &str,
) -> Vec<(String, Decimal)> {
    let mut agg: BTreeMap<String, Decimal> = BTreeMap::new();
    for e in expenses
        .iter()
        .filter(|e| date_in_prefix(e.data.date, month))
    {
        *agg.entry(e.data.payment_type.clone())
            .or_insert(Decimal::ZERO) += e.data.amount;
    }
    sorted_desc(agg)
}

/// Yearly "Category / Subcategory" spend, largest first.
pub fn yearly_subcategory_spend(
    expenses: &[Document<Expense>],
    year: &str,
) -> Vec<(String, Decimal)> {
    let mut agg: BTreeMap<String, Decimal> = BTreeMap::new();
    for e in expenses.iter().filter(|e| date_in_prefix(e.data.date, year)) {
        let key = format!("{} / {}", e.data.category, e.data.subcategory);
        *agg.entry(key).or_insert(Decimal::ZERO) += e.data.amount;
    }
    sorted_desc(agg)
}

#[derive(Debug, Clone, Serialize)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub payee: String,
    pub amount: Decimal,
}

/// Every purchase of one item name across all itemized expenses of the
/// year, chronological. A denormalized join over the item arrays.
pub fn price_history(
    expenses: &[Document<Expense>],
    item_name: &str,
    year: &str,
) -> Vec<PricePoint> {
    let mut history: Vec<PricePoint> = Vec::new();
    for e in expenses.iter().filter(|e| date_in_prefix(e.data.date, year)) {
        for item in e.data.items.iter().filter(|i| i.name == item_name) {
            history.push(PricePoint {
                date: e.data.date,
                payee: e.data.payee.clone(),
                amount: item.amount,
            });
        }
    }
    history.sort_by_key(|p| p.date);
    history
}

#[derive(Debug, Clone, Serialize)]
pub struct BudgetCommitments {
    pub recurring_income: Decimal,
    pub total_budgeted: Decimal,
    pub remaining: Decimal,
}

/// How much of the recurring income is already committed to budgets and
/// active subscriptions.
pub fn budget_commitments(
    income: &[Document<Income>],
    budgets: &[Document<Budget>],
    subscriptions: &[Document<Subscription>],
) -> BudgetCommitments {
    let recurring_income: Decimal = income
        .iter()
        .filter(|i| i.data.kind == IncomeKind::Recurring)
        .map(|i| i.data.amount)
        .sum();
    let budgeted: Decimal = budgets.iter().map(|b| b.data.amount).sum();
    let total_budgeted = budgeted + active_subscription_cost(subscriptions);
    BudgetCommitments {
        recurring_income,
        total_budgeted,
        remaining: recurring_income - total_budgeted,
    }
}

/// Budgeted amounts grouped by payment method across budgets and active
/// subscriptions; entries without a method land in "Unassigned".
pub fn budgeted_by_payment_method(
    budgets: &[Document<Budget>],
    subscriptions: &[Document<Subscription>],
) -> Vec<(String, Decimal)> {
    let mut agg: BTreeMap<String, Decimal> = BTreeMap::new();
    for b in budgets {
        let method = method_or_unassigned(&b.data.payment_method);
        *agg.entry(method).or_insert(Decimal::ZERO) += b.data.amount;
    }
    for s in subscriptions.iter().filter(|s| s.data.status.is_active()) {
        let method = method_or_unassigned(&s.data.payment_method);
        *agg.entry(method).or_insert(Decimal::ZERO) += s.data.amount;
    }
    sorted_desc(agg)
}

#[derive(Debug, Clone, Serialize)]
pub struct SummaryCards {
    pub budgeted: Decimal,
    pub spent: Decimal,
    pub remaining: Decimal,
}

/// Dashboard cards: total budgeted (budgets + active subscriptions),
/// spent this month, and the difference.
pub fn summary_cards(
    budgets: &[Document<Budget>],
    subscriptions: &[Document<Subscription>],
    expenses: &[Document<Expense>],
    month: &str,
) -> SummaryCards {
    let budgeted: Decimal = budgets.iter().map(|b| b.data.amount).sum::<Decimal>()
        + active_subscription_cost(subscriptions);
    let spent: Decimal = expenses
        .iter()
        .filter(|e| date_in_prefix(e.data.date, month))
        .map(|e| e.data.amount)
        .sum();
    SummaryCards {
        budgeted,
        spent,
        remaining: budgeted - spent,
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CalendarEntry {
    pub description: String,
    pub amount: Decimal,
    pub subscription: bool,
}

/// Calendar view of one month: expenses on their day, active
/// subscriptions on their start day-of-month (skipped when the day does
/// not exist in the month).
pub fn month_calendar(
    expenses: &[Document<Expense>],
    subscriptions: &[Document<Subscription>],
    year: i32,
    month: u32,
) -> BTreeMap<u32, Vec<CalendarEntry>> {
    let prefix = format!("{:04}-{:02}", year, month);
    let days = days_in_month(year, month);
    let mut by_day: BTreeMap<u32, Vec<CalendarEntry>> = BTreeMap::new();
    for e in expenses
        .iter()
        .filter(|e| date_in_prefix(e.data.date, &prefix))
    {
        by_day.entry(e.data.date.day()).or_default().push(CalendarEntry {
            description: e.data.payee.clone(),
            amount: e.data.amount,
            subscription: false,
        });
    }
    for s in subscriptions.iter().filter(|s| s.data.status.is_active()) {
        let day = s.data.start_date.day();
        if day <= days {
            by_day.entry(day).or_default().push(CalendarEntry {
                description: s.data.name.clone(),
                amount: s.data.amount,
                subscription: true,
            });
        }
    }
    by_day
}

pub fn days_in_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|d| d.pred_opt())
        .map(|d| d.day())
        .unwrap_or(31)
}

fn method_or_unassigned(method: &str) -> String {
    if method.trim().is_empty() {
        "Unassigned".to_string()
    } else {
        method.to_string()
    }
}

fn sorted_desc(agg: BTreeMap<String, Decimal>) -> Vec<(String, Decimal)> {
    let mut items: Vec<_> = agg.into_iter().collect();
    items.sort_by(|a, b| b.1.cmp(&a.1));
    items
}
