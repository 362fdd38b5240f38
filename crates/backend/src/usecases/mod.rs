pub mod u501_client_lookup;
pub mod u502_admin_notification;
