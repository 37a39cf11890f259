// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod income;
pub mod expenses;
pub mod subscriptions;
pub mod budgets;
pub mod points;
pub mod categories;
pub mod payments;
pub mod people;
pub mod grocery;
pub mod dashboard;
pub mod reports;
pub mod importer;
pub mod exporter;
