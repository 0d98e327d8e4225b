pub mod chat_area;
pub mod input_bar;
pub mod login_form;
pub mod nav_bar;
pub mod register_form;
