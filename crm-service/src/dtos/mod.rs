pub mod accounts;
pub mod follow_ups;
pub mod invoices;
pub mod quotations;

pub use accounts::{AccountResponse, CreateAccountRequest, UpdateAccountRequest};
pub use follow_ups::{
    AddFollowUpRequest, AddNoteRequest, UpdateFollowUpRequest, UpdateNoteRequest,
};
pub use invoices::{
    CreateInvoiceRequest, InvoiceResponse, RecordPaymentRequest, UpdateInvoiceRequest,
};
pub use quotations::{CreateQuotationRequest, QuotationResponse, UpdateQuotationRequest};
