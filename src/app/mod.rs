pub mod site;
pub mod widgets;
