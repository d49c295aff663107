pub mod team_service;
