// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod food;
pub mod profile_form;
pub mod recommendation;
pub mod user;

pub use food::{FoodItem, LoggedAmount, LoggedFood};
pub use profile_form::{FieldErrors, ProfileForm};
pub use recommendation::{RecommendationRequest, RecommendedFood};
pub use user::{MacroRatio, Sex, UserProfile};
