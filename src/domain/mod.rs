//! Domain records listed and toggled by the back-office pages.

pub mod banner;
pub mod booking;
pub mod generic;
pub mod noticeboard;
pub mod record;
pub mod referral;
pub mod resource;
pub mod testimonial;
pub mod toggle;
pub mod types;
