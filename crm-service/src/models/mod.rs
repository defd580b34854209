pub mod business_account;
pub mod follow_up;
pub mod invoice;
pub mod line_item;
pub mod quotation;

pub use business_account::{AccountStatus, BusinessAccount, SourceType, Temperature};
pub use follow_up::{FollowUp, FollowUpStatus, Note};
pub use invoice::{Invoice, Payment, PaymentStatus};
pub use line_item::{GstDetails, GstType, LineItem, Specification};
pub use quotation::{Quotation, QuotationStatus};
