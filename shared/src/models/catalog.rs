//! Workout / Diet Catalog Model

use serde::{Deserialize, Serialize};

/// Catalog entry for the workout and diet plan collections
///
/// Both collections share one shape; `kind` is "workout" or "diet".
/// Workout entries carry a `level`, diet entries a `calories` label.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogPlan {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub level: String,
    #[serde(default)]
    pub calories: String,
    #[serde(default)]
    pub items: Vec<String>,
}

impl CatalogPlan {
    pub fn default_workouts() -> Vec<CatalogPlan> {
        let entry = |id: &str, name: &str, level: &str, items: &[&str]| CatalogPlan {
            id: id.into(),
            name: name.into(),
            kind: "workout".into(),
            level: level.into(),
            calories: String::new(),
            items: items.iter().map(|s| s.to_string()).collect(),
        };
        vec![
            entry(
                "w1",
                "Beginner Full Body",
                "Beginner",
                &[
                    "Push-ups 3x15",
                    "Squats 3x20",
                    "Plank 3x30sec",
                    "Lunges 3x12",
                    "Dumbbell Rows 3x12",
                ],
            ),
            entry(
                "w2",
                "Intermediate Split",
                "Intermediate",
                &[
                    "Bench Press 4x10",
                    "Deadlift 4x8",
                    "Pull-ups 3x10",
                    "Shoulder Press 4x10",
                    "Barbell Curls 3x12",
                ],
            ),
            entry(
                "w3",
                "Advanced Power",
                "Advanced",
                &[
                    "Heavy Squats 5x5",
                    "Heavy Deadlift 5x5",
                    "Heavy Bench 5x5",
                    "Weighted Pull-ups 4x8",
                    "Power Cleans 4x6",
                ],
            ),
        ]
    }

    pub fn default_diets() -> Vec<CatalogPlan> {
        let entry = |id: &str, name: &str, calories: &str, items: &[&str]| CatalogPlan {
            id: id.into(),
            name: name.into(),
            kind: "diet".into(),
            level: String::new(),
            calories: calories.into(),
            items: items.iter().map(|s| s.to_string()).collect(),
        };
        vec![
            entry(
                "d1",
                "Weight Gain (3000 cal)",
                "3000",
                &[
                    "Breakfast: 6 Eggs + Oats + Banana",
                    "Snack: Protein Shake + Nuts",
                    "Lunch: Rice + Chicken + Salad",
                    "Snack: Peanut Butter Toast",
                    "Dinner: Roti + Paneer + Dal",
                    "Before Bed: Milk + Almonds",
                ],
            ),
            entry(
                "d2",
                "Weight Loss (1800 cal)",
                "1800",
                &[
                    "Breakfast: Oats + 3 Egg Whites",
                    "Snack: Green Tea + Apple",
                    "Lunch: Brown Rice + Grilled Chicken",
                    "Snack: Sprouts Salad",
                    "Dinner: Soup + Grilled Fish",
                    "Before Bed: Warm Water + Lemon",
                ],
            ),
            entry(
                "d3",
                "Maintenance (2200 cal)",
                "2200",
                &[
                    "Breakfast: Poha + 4 Eggs",
                    "Snack: Fruits + Yogurt",
                    "Lunch: Rice + Dal + Sabzi",
                    "Snack: Protein Bar",
                    "Dinner: Roti + Chicken Curry",
                    "Before Bed: Milk",
                ],
            ),
        ]
    }
}
