//! Widget components for the GUI
//!
//! Reusable UI pieces embedded in the views. Field widgets are stateless and
//! receive their lookups (avatars, network names) from the caller.
//!
//! ## Available Widgets
//!
//! - `AddressField`, `NetworkField`, `BalanceField`, `TextField` - labelled fields
//! - `PinCodeField` - six-cell PIN input
//! - `PasswordModal` - password prompt for signing
//! - `TokenSummaryBlock` - portfolio total with receive/send/buy actions

mod address_field;
mod balance_field;
mod field_base;
mod network_field;
mod password_modal;
mod pin_code_field;
mod text_field;
mod token_summary;

pub use address_field::{display_address, AddressField, AddressFieldResponse};
pub use balance_field::{balance_text, BalanceField};
pub use field_base::FieldBase;
pub use network_field::{NetworkField, NetworkFieldResponse};
pub use password_modal::{PasswordModal, PasswordModalResponse};
pub use pin_code_field::{PinCodeField, PinCodeFieldResponse};
pub use text_field::TextField;
pub use token_summary::{SummaryAction, TokenSummaryBlock};

#[cfg(test)]
pub(crate) mod test_support {
    use eframe::egui;

    /// Run `add` inside a central panel of a headless frame
    pub fn render(add: impl FnOnce(&mut egui::Ui)) {
        let ctx = egui::Context::default();
        let _ = ctx.run(egui::RawInput::default(), |ctx| {
            egui::CentralPanel::default().show(ctx, add);
        });
    }
}
