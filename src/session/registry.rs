// ABOUTME: Registry of exercise handlers keyed by canonical name with alias-aware lookup
// ABOUTME: Built once from the calibration tables, then shared read-only across sessions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 GetUpGo Contributors

//! # Exercise Registry
//!
//! Maps exercise names to [`ExerciseHandler`]s. Lookup is case-insensitive
//! and accepts aliases ("Squat" for "Squats", "Warrior Pose" for
//! "Warrior II Pose"); when no name matches exactly, a name that contains
//! or is contained in the query is accepted. Anything else is reported as
//! not supported.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use getupgo_intelligence::{CalorieEstimator, IntelligenceConfig, PoseClassifier};
use tracing::{debug, warn};

use super::exercises::{HoldPoseHandler, RepExerciseHandler};
use super::handler::{ExerciseDescriptor, ExerciseHandler};
use crate::errors::{AppError, AppResult, ErrorCode};
use crate::models::ActivityKind;

/// Registered exercise handlers
#[derive(Default)]
pub struct ExerciseRegistry {
    /// Handlers by lowercase canonical name
    handlers: HashMap<String, Arc<dyn ExerciseHandler>>,
    /// Canonical names in registration order
    order: Vec<String>,
}

impl ExerciseRegistry {
    /// Create a new empty registry
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding every motion and pose rule from `config`
    #[must_use]
    pub fn builtin(config: &IntelligenceConfig) -> Self {
        let calories = Arc::new(CalorieEstimator::new(config.metabolic.clone()));
        let classifier = Arc::new(PoseClassifier::new(
            config.poses.clone(),
            config.min_visibility,
        ));

        let mut registry = Self::new();
        for rule in &config.motions {
            registry.register(Arc::new(RepExerciseHandler::new(
                rule.clone(),
                config.rep_tolerance,
                config.min_visibility,
                Arc::clone(&calories),
            )));
        }
        for rule in classifier.rules() {
            registry.register(Arc::new(HoldPoseHandler::new(
                rule,
                Arc::clone(&classifier),
                Arc::clone(&calories),
            )));
        }
        debug!(exercises = registry.len(), "exercise registry built");
        registry
    }

    /// Register a handler
    ///
    /// # Returns
    ///
    /// `true` if the handler was registered, `false` if one with the same name exists
    pub fn register(&mut self, handler: Arc<dyn ExerciseHandler>) -> bool {
        let name = handler.descriptor().name.clone();
        let key = name.to_lowercase();

        if self.handlers.contains_key(&key) {
            warn!("Exercise '{}' is already registered, skipping", name);
            return false;
        }

        debug!(
            "Registering exercise '{}' scored by {:?}",
            name,
            handler.descriptor().kind
        );
        self.handlers.insert(key, handler);
        self.order.push(name);
        true
    }

    /// Get a handler by canonical name (case-insensitive)
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Arc<dyn ExerciseHandler>> {
        self.handlers.get(&name.to_lowercase())
    }

    /// Check if an exercise is registered under its canonical name
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.handlers.contains_key(&name.to_lowercase())
    }

    /// Get the number of registered exercises
    #[must_use]
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// Check if the registry is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Canonical names in registration order
    #[must_use]
    pub fn exercise_names(&self) -> Vec<&str> {
        self.order.iter().map(String::as_str).collect()
    }

    /// Descriptors in registration order, optionally filtered by kind
    #[must_use]
    pub fn descriptors(&self, kind: Option<ActivityKind>) -> Vec<&ExerciseDescriptor> {
        self.order
            .iter()
            .filter_map(|name| self.get(name))
            .map(|handler| handler.descriptor())
            .filter(|descriptor| kind.is_none() || kind == Some(descriptor.kind))
            .collect()
    }

    /// Find the handler for a user-supplied exercise name
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` when no registered exercise answers to `name`
    pub fn resolve(&self, name: &str) -> AppResult<Arc<dyn ExerciseHandler>> {
        let query = name.trim().to_lowercase();
        if query.is_empty() {
            return Err(AppError::invalid_input("Exercise name must not be empty"));
        }

        let handlers = || self.order.iter().filter_map(|key| self.get(key));

        let exact = handlers().find(|handler| {
            handler
                .descriptor()
                .names()
                .any(|candidate| candidate.to_lowercase() == query)
        });
        let found = exact.or_else(|| {
            handlers().find(|handler| {
                handler.descriptor().names().any(|candidate| {
                    let candidate = candidate.to_lowercase();
                    candidate.contains(&query) || query.contains(&candidate)
                })
            })
        });

        found.map(Arc::clone).ok_or_else(|| {
            AppError::new(
                ErrorCode::ResourceNotFound,
                format!("Exercise '{}' not supported", name.trim()),
            )
        })
    }
}

impl fmt::Debug for ExerciseRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExerciseRegistry")
            .field("exercises", &self.order)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> ExerciseRegistry {
        ExerciseRegistry::builtin(&IntelligenceConfig::default())
    }

    #[test]
    fn test_builtin_registers_motions_and_poses() {
        let registry = registry();
        for name in ["Squats", "Pushups", "Plank", "Tree Pose", "Warrior II Pose"] {
            assert!(registry.contains(name), "{name} missing");
        }
        assert!(!registry.contains("Flap"));
        assert_eq!(
            registry.descriptors(Some(ActivityKind::Hold)).len(),
            registry.len() - registry.descriptors(Some(ActivityKind::Reps)).len()
        );
    }

    #[test]
    fn test_resolve_aliases_and_case() {
        let registry = registry();
        assert_eq!(registry.resolve("squat").unwrap().descriptor().name, "Squats");
        assert_eq!(
            registry.resolve("Warrior Pose").unwrap().descriptor().name,
            "Warrior II Pose"
        );
        assert_eq!(registry.resolve("PLANK").unwrap().descriptor().name, "Plank");
        assert_eq!(registry.resolve("tree").unwrap().descriptor().name, "Tree Pose");
    }

    #[test]
    fn test_resolve_unknown_exercise() {
        let error = registry().resolve("Jumping Jacks").unwrap_err();
        assert_eq!(error.code, ErrorCode::ResourceNotFound);
        assert_eq!(error.message, "Exercise 'Jumping Jacks' not supported");
    }

    #[test]
    fn test_duplicate_registration_is_skipped() {
        let config = IntelligenceConfig::default();
        let mut registry = ExerciseRegistry::builtin(&config);
        let before = registry.len();
        let handler = registry.resolve("Squats").unwrap();
        assert!(!registry.register(handler));
        assert_eq!(registry.len(), before);
    }
}
