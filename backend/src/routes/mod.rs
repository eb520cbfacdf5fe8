pub(crate) mod deals;
pub(crate) mod health;
pub(crate) mod managers;
pub(crate) mod reports;
