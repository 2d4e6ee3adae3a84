//! Symptom Advisor: symptom intake, AI-generated advice, nearby doctors.

pub mod advice;
pub mod config;
pub mod error;
pub mod html;
pub mod intake;
pub mod llm;
pub mod places;
pub mod results;
pub mod web;
