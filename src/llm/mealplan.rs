// ABOUTME: Weekly meal-plan generation from an evaluation summary via a text generator
// ABOUTME: Prompt template, seven-day plan schema, and fenced-JSON tolerant parsing
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Anthro Health

//! Weekly meal-plan generation.
//!
//! Builds a prompt from the calorie report, asks the configured
//! [`TextGenerator`] for a seven-day plan, and parses the reply into a
//! typed schema. The day keys and macro field names stay in Spanish because
//! the original frontend consumes this exact shape.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::TextGenerator;
use crate::energy::CalorieReport;
use crate::errors::{AppError, AppResult};
use crate::models::Observation;

/// Week days in plan order, as the wire format spells them
pub const PLAN_DAYS: [&str; 7] = [
    "lunes",
    "martes",
    "miércoles",
    "jueves",
    "viernes",
    "sábado",
    "domingo",
];

/// Macronutrient split for one day, grams
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Macros {
    pub carbohidratos: f64,
    pub proteinas: f64,
    pub grasas: f64,
}

/// One day of the plan
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DayPlan {
    /// Total calories for the day, kcal
    pub calorias_totales: f64,
    pub macros: Macros,
    /// Meal name to list of items
    pub comidas: BTreeMap<String, Vec<String>>,
}

/// Seven-day meal plan keyed by day name
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MealPlan {
    pub plan: BTreeMap<String, DayPlan>,
}

/// Best-effort meal-plan service over a text generator
#[derive(Clone)]
pub struct MealPlanService {
    generator: Arc<dyn TextGenerator>,
}

impl MealPlanService {
    /// Create a service over any text generator
    #[must_use]
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }

    /// Generate a weekly plan for an evaluated observation
    ///
    /// # Errors
    ///
    /// Returns `AppError::ExternalServiceError` when the generator fails or
    /// returns output that does not parse into the plan schema. Never
    /// panics; the evaluation endpoints are unaffected by failures here.
    pub async fn generate(
        &self,
        observation: &Observation,
        report: &CalorieReport,
    ) -> AppResult<MealPlan> {
        let prompt = build_prompt(observation, report);
        let raw = self.generator.generate(&prompt).await?;

        let plan = parse_plan(&raw).map_err(|e| {
            warn!(provider = self.generator.name(), error = %e, "Meal-plan output did not parse");
            e
        })?;

        info!(
            provider = self.generator.name(),
            days = plan.plan.len(),
            "Generated weekly meal plan"
        );
        Ok(plan)
    }
}

/// Build the generation prompt from the evaluation summary
fn build_prompt(observation: &Observation, report: &CalorieReport) -> String {
    let sex = match observation.sex {
        crate::models::Sex::Male => "male",
        crate::models::Sex::Female => "female",
    };

    format!(
        "You are a pediatric nutritionist. Create a weekly meal plan for a {sex} child, \
         age {age} months, weight {weight} kg, height {height} m. \
         BMI classification: {class}. Daily caloric target: {target} kcal.\n\
         Respond with JSON only, no prose, in exactly this shape:\n\
         {{\"plan\": {{\"lunes\": {{\"calorias_totales\": 0, \
         \"macros\": {{\"carbohidratos\": 0, \"proteinas\": 0, \"grasas\": 0}}, \
         \"comidas\": {{\"desayuno\": [\"...\"], \"almuerzo\": [\"...\"], \"cena\": [\"...\"]}}}}, \
         ...}}}}\n\
         Cover all seven days: {days}. Keep each day's calorias_totales within \
         5% of the caloric target.",
        age = observation.age_months,
        weight = observation.weight_kg,
        height = observation.height_m,
        class = report.bmi_classification,
        target = report.caloric_target,
        days = PLAN_DAYS.join(", "),
    )
}

/// Parse generator output into a plan, tolerating a fenced ```json block
fn parse_plan(raw: &str) -> AppResult<MealPlan> {
    let trimmed = strip_code_fence(raw);
    let plan: MealPlan = serde_json::from_str(trimmed).map_err(|e| {
        AppError::external_service("meal-plan", format!("Plan output is not valid JSON: {e}"))
    })?;

    if plan.plan.is_empty() {
        return Err(AppError::external_service(
            "meal-plan",
            "Plan output contained no days",
        ));
    }
    Ok(plan)
}

/// Strip a surrounding Markdown code fence if present
fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // Drop the language tag on the opening fence line
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    let rest = rest.strip_suffix("```").unwrap_or(rest);
    rest.trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    const PLAN_JSON: &str = r#"{
        "plan": {
            "lunes": {
                "calorias_totales": 1800,
                "macros": {"carbohidratos": 230, "proteinas": 80, "grasas": 60},
                "comidas": {
                    "desayuno": ["oatmeal with fruit"],
                    "almuerzo": ["chicken and rice"],
                    "cena": ["vegetable soup"]
                }
            }
        }
    }"#;

    #[test]
    fn test_parse_plain_json() {
        let plan = parse_plan(PLAN_JSON).unwrap();
        let monday = &plan.plan["lunes"];
        assert!((monday.calorias_totales - 1800.0).abs() < f64::EPSILON);
        assert_eq!(monday.comidas["desayuno"], vec!["oatmeal with fruit"]);
    }

    #[test]
    fn test_parse_fenced_json() {
        let fenced = format!("```json\n{PLAN_JSON}\n```");
        assert!(parse_plan(&fenced).is_ok());
    }

    #[test]
    fn test_empty_plan_rejected() {
        let err = parse_plan(r#"{"plan": {}}"#).unwrap_err();
        assert_eq!(err.code, crate::errors::ErrorCode::ExternalServiceError);
    }

    #[test]
    fn test_prose_rejected() {
        assert!(parse_plan("Here is your plan: eat well.").is_err());
    }

    #[test]
    fn test_prompt_mentions_target_and_days() {
        use crate::models::Sex;

        let observation = Observation::new(Sex::Male, 96, 30.5, 1.34).unwrap();
        let report = CalorieReport {
            tmb_schofield: 1197.35,
            tmb_who: 1187.35,
            get_schofield: 1796.03,
            get_who: 1781.03,
            bmi: 16.99,
            bmi_percentile: 60.0,
            bmi_classification: "Normal weight",
            activity_factor: 1.5,
            activity_level: "moderate",
            caloric_target: 1781.03,
            suggestion: None,
        };

        let prompt = build_prompt(&observation, &report);
        assert!(prompt.contains("1781.03"));
        assert!(prompt.contains("domingo"));
        assert!(prompt.contains("Normal weight"));
    }
}
