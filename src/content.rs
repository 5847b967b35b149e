//! Fixed informational content: remedies, foods, recipes, SOS guidance, terms.

use crate::timer::sos::SosStep;

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum RemedyCategory {
    Technique,
    Natural,
    Environment,
}

impl RemedyCategory {
    pub fn label(self) -> &'static str {
        match self {
            RemedyCategory::Technique => "technique",
            RemedyCategory::Natural => "natural",
            RemedyCategory::Environment => "environment",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Remedy {
    pub title: &'static str,
    pub description: &'static str,
    pub category: RemedyCategory,
    pub duration: Option<&'static str>,
    pub instructions: &'static [&'static str],
}

pub const REMEDIES: &[Remedy] = &[
    Remedy {
        title: "20-Minute Rule",
        description: "Break the cycle of lying awake in bed",
        category: RemedyCategory::Technique,
        duration: None,
        instructions: &[
            "If you can't fall asleep within 20 minutes, get up",
            "Go to another room with dim lighting",
            "Read a book or do quiet activities (no screens)",
            "Return to bed when you feel sleepy",
        ],
    },
    Remedy {
        title: "4-7-8 Breathing",
        description: "Activates your parasympathetic nervous system",
        category: RemedyCategory::Technique,
        duration: Some("2-3 minutes"),
        instructions: &[
            "Inhale through nose for 4 counts",
            "Hold your breath for 7 counts",
            "Exhale through mouth for 8 counts",
            "Repeat 3-4 cycles",
        ],
    },
    Remedy {
        title: "Progressive Muscle Relaxation",
        description: "Releases physical tension throughout your body",
        category: RemedyCategory::Technique,
        duration: Some("10-15 minutes"),
        instructions: &[
            "Start with your toes, tense for 5 seconds",
            "Release and notice the relaxation",
            "Move up through each muscle group",
            "End with your face and scalp",
        ],
    },
    Remedy {
        title: "Valerian Root",
        description: "Natural sedative herb that promotes relaxation",
        category: RemedyCategory::Natural,
        duration: None,
        instructions: &[
            "Take 300-600mg 1-2 hours before bed",
            "Start with lower dose to test tolerance",
            "Consult healthcare provider if on medications",
            "Best used consistently for 2-4 weeks",
        ],
    },
    Remedy {
        title: "Magnesium Glycinate",
        description: "Calms nervous system and relaxes muscles",
        category: RemedyCategory::Natural,
        duration: None,
        instructions: &[
            "Take 200-400mg 30 minutes before bed",
            "Choose glycinate form for better absorption",
            "Start with 200mg to avoid digestive issues",
            "Take with small amount of food if needed",
        ],
    },
    Remedy {
        title: "Sleep Environment",
        description: "Optimize your bedroom for better sleep",
        category: RemedyCategory::Environment,
        duration: None,
        instructions: &[
            "Keep room temperature between 60-67°F (15-19°C)",
            "Use blackout curtains or eye mask",
            "Remove electronic devices or use blue light filters",
            "Consider white noise or earplugs",
        ],
    },
];

pub const INSOMNIA_NOTES: &[&str] = &[
    "Consult a healthcare provider before trying herbal supplements",
    "If insomnia persists for more than 2 weeks, seek professional help",
    "Some natural remedies may interact with medications",
    "Results may take 1-4 weeks of consistent use",
];

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum FoodCategory {
    Snack,
    Drink,
    Meal,
}

impl FoodCategory {
    pub fn label(self) -> &'static str {
        match self {
            FoodCategory::Snack => "snack",
            FoodCategory::Drink => "drink",
            FoodCategory::Meal => "meal",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Food {
    pub name: &'static str,
    pub benefits: &'static str,
    pub timing: &'static str,
    pub category: FoodCategory,
}

pub const FOODS: &[Food] = &[
    Food {
        name: "Bananas",
        benefits: "Rich in magnesium and potassium for muscle relaxation",
        timing: "1-2 hours before bed",
        category: FoodCategory::Snack,
    },
    Food {
        name: "Almonds",
        benefits: "High in melatonin and healthy fats",
        timing: "Small handful 30 mins before bed",
        category: FoodCategory::Snack,
    },
    Food {
        name: "Chamomile Tea",
        benefits: "Natural sedative properties, reduces anxiety",
        timing: "45-60 mins before bed",
        category: FoodCategory::Drink,
    },
    Food {
        name: "Oatmeal",
        benefits: "Complex carbs promote serotonin production",
        timing: "2-3 hours before bed",
        category: FoodCategory::Meal,
    },
    Food {
        name: "Tart Cherry Juice",
        benefits: "Natural source of melatonin",
        timing: "1 hour before bed",
        category: FoodCategory::Drink,
    },
    Food {
        name: "Whole Grain Toast with Almond Butter",
        benefits: "Magnesium + tryptophan combination",
        timing: "1-2 hours before bed",
        category: FoodCategory::Snack,
    },
];

#[derive(Debug, Clone)]
pub struct Recipe {
    pub name: &'static str,
    pub ingredients: &'static str,
    pub instructions: &'static str,
}

pub const QUICK_RECIPES: &[Recipe] = &[
    Recipe {
        name: "Golden Milk",
        ingredients: "Turmeric + Almond Milk + Honey",
        instructions: "Warm 1 cup almond milk, add 1/2 tsp turmeric, 1 tsp honey",
    },
    Recipe {
        name: "Sleep Smoothie",
        ingredients: "Banana + Chamomile Tea + Almonds",
        instructions: "Blend frozen banana, cooled chamomile tea, 6 almonds",
    },
    Recipe {
        name: "Bedtime Bowl",
        ingredients: "Oats + Banana + Cinnamon",
        instructions: "Mix 1/2 cup oats, sliced banana, pinch of cinnamon with warm milk",
    },
];

pub const FOOD_GUIDELINES: &[&str] = &[
    "Eat 1-2 hours before bed for optimal digestion",
    "Avoid spicy, heavy, or acidic foods late at night",
    "Stop caffeine intake at least 6 hours before bedtime",
    "Stay hydrated but limit fluids 2 hours before sleep",
];

pub struct SosStepGuide {
    pub title: &'static str,
    pub description: &'static str,
    pub instructions: &'static [&'static str],
}

pub fn sos_step_guide(step: SosStep) -> SosStepGuide {
    match step {
        SosStep::DeepBreathing => SosStepGuide {
            title: "Deep Breathing",
            description: "Calm your nervous system",
            instructions: &[
                "Sit or lie down comfortably",
                "Close your eyes gently",
                "Breathe in slowly for 4 counts",
                "Hold for 4 counts",
                "Exhale slowly for 6 counts",
                "Repeat this rhythm",
            ],
        },
        SosStep::BodyScan => SosStepGuide {
            title: "Body Scan",
            description: "Release physical tension",
            instructions: &[
                "Start at the top of your head",
                "Notice any tension or tightness",
                "Consciously relax each part",
                "Move slowly down your body",
                "End with your toes",
                "Let your whole body sink into relaxation",
            ],
        },
        SosStep::Acupressure => SosStepGuide {
            title: "Acupressure Points",
            description: "Natural pressure points for sleep",
            instructions: &[
                "Press the center of your palm for 30 seconds",
                "Massage the area between your eyebrows",
                "Apply gentle pressure behind your earlobes",
                "Press the point on your wrist (2 fingers below palm)",
            ],
        },
    }
}

pub const ACUPRESSURE_GUIDE: &str = "Apply gentle, steady pressure for 30 seconds at each point. \
You should feel a slight sensation but no pain.";

pub const SOS_INTRO: &str = "This 5-minute emergency protocol combines breathing, body relaxation, \
and acupressure to help you fall asleep quickly.";

pub const SOS_QUICK_TIPS: &[&str] = &[
    "Use this when you've been awake for more than 20 minutes",
    "Keep lights dim during the session",
    "Try to stay still and comfortable throughout",
    "If still awake after, consider the 20-minute rule",
];

pub struct TermsSection {
    pub heading: &'static str,
    pub paragraphs: &'static [&'static str],
    pub bullets: &'static [&'static str],
}

pub const TERMS_TITLE: &str = "Terms and Privacy Policy";

pub const TERMS_SECTIONS: &[TermsSection] = &[
    TermsSection {
        heading: "1. Acceptance of Terms",
        paragraphs: &[
            "By using BeatSomnia, you agree to these Terms and Privacy Policy. If you do not agree, please do not use the service.",
        ],
        bullets: &[],
    },
    TermsSection {
        heading: "2. Service Description",
        paragraphs: &[
            "BeatSomnia provides sleep-related tools for informational purposes only. No medical advice is provided.",
        ],
        bullets: &[],
    },
    TermsSection {
        heading: "3. User Responsibility",
        paragraphs: &[],
        bullets: &[
            "Your use of this service is at your own risk.",
            "You are responsible for any data you submit.",
            "No illegal or harmful materials allowed.",
        ],
    },
    TermsSection {
        heading: "4. Data & Privacy",
        paragraphs: &[],
        bullets: &[
            "We may collect anonymous usage data to improve the service.",
            "No sensitive personal data is intentionally collected.",
            "Third-party services may collect data as described in their own policies.",
        ],
    },
    TermsSection {
        heading: "5. Changes and Availability",
        paragraphs: &[],
        bullets: &[
            "We may update or discontinue any part of the service at any time.",
            "We may update these Terms at any time.",
            "BeatSomnia is provided as-is, without warranty.",
        ],
    },
    TermsSection {
        heading: "6. Jurisdiction",
        paragraphs: &["This agreement is governed by the laws of your local jurisdiction."],
        bullets: &[],
    },
    TermsSection {
        heading: "7. Contact",
        paragraphs: &["For questions, contact: info@beatsomnia.com"],
        bullets: &[],
    },
];

/// Plain-text rendering of the terms page.
pub fn terms_text() -> String {
    let mut out = format!("{TERMS_TITLE}\n");
    for section in TERMS_SECTIONS {
        out.push('\n');
        out.push_str(section.heading);
        out.push('\n');
        for paragraph in section.paragraphs {
            out.push_str(paragraph);
            out.push('\n');
        }
        for bullet in section.bullets {
            out.push_str("  • ");
            out.push_str(bullet);
            out.push('\n');
        }
    }
    out
}
