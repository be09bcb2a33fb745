use serde::{Deserialize, Serialize};

/// Reserved fallback category. Always accepted on transactions, never
/// required to exist as a stored row, and the reassignment target when a
/// category is deleted.
pub const OTHER_CATEGORY: &str = "Other";

/// Seed list for the "load default categories" operation.
pub const DEFAULT_CATEGORIES: &[&str] = &[
    "Income (Credited)",
    "Rental Home Expenses",
    "Family Home Expenses",
    "Subscriptions",
    "Breakfast",
    "Lunch",
    "Dinner",
    "Fruits",
    "Bike Service",
    "Petrol",
    "Laundry / Ironing",
    "Studies / Exam Prep",
    "Personal Care",
    "Other",
];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    pub created_at: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewCategory {
    pub name: String,
}
