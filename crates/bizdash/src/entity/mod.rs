//! Concrete dashboard records.
//!
//! Each entity carries its static model, its stored-status vocabulary, the
//! date that drives its derived status, and the KPI set its list view
//! shows by default.

mod invoice;
mod material;
mod purchase_order;
mod supplier;
mod task;

#[cfg(test)]
mod tests;

pub use invoice::{INVOICE_MODEL, Invoice, InvoiceStatus};
pub use material::{MATERIAL_MODEL, MaterialRequirement, MaterialStatus};
pub use purchase_order::{PURCHASE_ORDER_MODEL, PurchaseOrder, PurchaseOrderStatus};
pub use supplier::{SUPPLIER_MODEL, Supplier, SupplierStatus};
pub use task::{TASK_MODEL, Task, TaskPriority, TaskStatus};

use bizdash_config::ViewId;
use bizdash_core::{db::aggregate::KpiSpec, traits::Record};

///
/// DashboardEntity
///
/// A record type with its own list view.
///

pub trait DashboardEntity: Record + Clone {
    /// View that lists this entity.
    const VIEW: ViewId;

    /// KPIs shown above the list when no custom set is given.
    fn default_kpis() -> Vec<KpiSpec<Self::Status>>;
}
