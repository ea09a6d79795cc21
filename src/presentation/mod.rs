//! HTML views built on askama templates.

pub mod views;
