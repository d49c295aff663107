pub mod member_service;
