pub mod accounts;
pub mod invoices;
pub mod memory;
pub mod mongo;
pub mod quotations;
pub mod store;

pub use accounts::AccountService;
pub use invoices::InvoiceService;
pub use memory::MemoryStore;
pub use mongo::MongoStore;
pub use quotations::QuotationService;
pub use store::{AccountFilter, AccountStore, HealthProbe, InvoiceStore, QuotationStore};
