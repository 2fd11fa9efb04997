pub mod navbar;
pub mod package_card;
pub mod review_modal;
pub mod sidebar;
pub mod toast;
