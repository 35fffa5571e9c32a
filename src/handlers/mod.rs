pub mod budgets;
pub mod categories;
pub mod dashboard;
pub mod events;
pub mod health;
pub mod households;
pub mod transactions;
pub mod users;
