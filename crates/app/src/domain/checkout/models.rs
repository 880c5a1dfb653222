//! Checkout Models

/// Receipt returned to the buyer after a purchase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PurchaseReceipt {
    pub buyer_name: String,
    pub product_name: String,
    pub quantity: u64,
}

/// Which checkout entry point handled a purchase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckoutKind {
    Single,
    Cart,
}

impl CheckoutKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Single => "single",
            Self::Cart => "cart",
        }
    }
}
