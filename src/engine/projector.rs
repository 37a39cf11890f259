// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{Budget, Expense, PayType, Person, Subscription};
use crate::store::Document;
use chrono::{Datelike, Days, NaiveDate};
use rust_decimal::Decimal;
use serde::Serialize;

/// Derived, read-only feed of recent and upcoming cash events. Recomputed
/// in full from the latest collection snapshot on every change; nothing
/// here is persisted.

const WINDOW_DAYS: u64 = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EventTag {
    Recent,
    Upcoming,
    UpcomingManual,
}

impl EventTag {
    pub fn label(self) -> &'static str {
        match self {
            EventTag::Recent => "recent",
            EventTag::Upcoming => "upcoming",
            EventTag::UpcomingManual => "upcoming_manual",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CashEvent {
    pub date: NaiveDate,
    pub description: String,
    pub amount: Decimal,
    pub tag: EventTag,
}

pub struct FeedSnapshot<'a> {
    pub expenses: &'a [Document<Expense>],
    pub budgets: &'a [Document<Budget>],
    pub subscriptions: &'a [Document<Subscription>],
}

/// Next billing date for an active subscription: the start date's
/// day-of-month in the current month, rolled one month forward when that
/// day has already passed. None when the billing day does not exist in
/// the target month.
pub fn next_billing_date(sub: &Subscription, today: NaiveDate) -> Option<NaiveDate> {
    let day = sub.start_date.day();
    let candidate = NaiveDate::from_ymd_opt(today.year(), today.month(), day)?;
    if candidate < today {
        let (year, month) = if today.month() == 12 {
            (today.year() + 1, 1)
        } else {
            (today.year(), today.month() + 1)
        };
        NaiveDate::from_ymd_opt(year, month, day)
    } else {
        Some(candidate)
    }
}

/// Due date of a manual budget in the current month. Literal day-number
/// semantics: a due day past the end of the month yields no date.
fn manual_due_date(budget: &Budget, today: NaiveDate) -> Option<NaiveDate> {
    if budget.pay_type != PayType::Manual {
        return None;
    }
    let due_day = budget.due_day?;
    NaiveDate::from_ymd_opt(today.year(), today.month(), due_day)
}

/// Build the unified feed: expenses from the last seven days, manual
/// budget due dates and active subscription billings in the next seven
/// (both windows inclusive). Coinciding events from different sources are
/// all emitted; nothing is deduplicated.
pub fn recompute(snapshot: &FeedSnapshot<'_>, today: NaiveDate) -> Vec<CashEvent> {
    let window = Days::new(WINDOW_DAYS);
    let recent_start = today.checked_sub_days(window).unwrap_or(today);
    let upcoming_end = today.checked_add_days(window).unwrap_or(today);

    let mut events = Vec::new();

    for doc in snapshot.budgets {
        if let Some(due) = manual_due_date(&doc.data, today) {
            if due >= today && due <= upcoming_end {
                events.push(CashEvent {
                    date: due,
                    description: format!("{} / {}", doc.data.category, doc.data.subcategory),
                    amount: doc.data.amount,
                    tag: EventTag::UpcomingManual,
                });
            }
        }
    }

    for doc in snapshot.subscriptions {
        if !doc.data.status.is_active() {
            continue;
        }
        if let Some(due) = next_billing_date(&doc.data, today) {
            if due >= today && due <= upcoming_end {
                events.push(CashEvent {
                    date: due,
                    description: doc.data.name.clone(),
                    amount: doc.data.amount,
                    tag: EventTag::Upcoming,
                });
            }
        }
    }

    for doc in snapshot.expenses {
        if doc.data.date >= recent_start && doc.data.date <= today {
            events.push(CashEvent {
                date: doc.data.date,
                description: doc.data.payee.clone(),
                amount: doc.data.amount,
                tag: EventTag::Recent,
            });
        }
    }

    events.sort_by_key(|e| e.date);
    events
}

/// Group a sorted feed by date for display.
pub fn group_by_date(events: Vec<CashEvent>) -> Vec<(NaiveDate, Vec<CashEvent>)> {
    let mut grouped: Vec<(NaiveDate, Vec<CashEvent>)> = Vec::new();
    for event in events {
        match grouped.last_mut() {
            Some((date, bucket)) if *date == event.date => bucket.push(event),
            _ => grouped.push((event.date, vec![event])),
        }
    }
    grouped
}

/// Birthdays falling within the next 30 days, soonest first. A Feb 29
/// birthday only shows in leap years.
pub fn upcoming_birthdays(
    people: &[Document<Person>],
    today: NaiveDate,
) -> Vec<(String, NaiveDate)> {
    let horizon = today.checked_add_days(Days::new(30)).unwrap_or(today);
    let mut upcoming: Vec<(String, NaiveDate)> = people
        .iter()
        .filter_map(|doc| {
            let b = doc.data.birthday;
            let this_year = NaiveDate::from_ymd_opt(today.year(), b.month(), b.day())?;
            if this_year >= today && this_year < horizon {
                Some((doc.data.name.clone(), this_year))
            } else {
                None
            }
        })
        .collect();
    upcoming.sort_by_key(|(_, date)| *date);
    upcoming
}
