//! Classification of a single reading against the WHO 2023 hypertension scale.

use crate::entities::blood_pressure::{
    BloodPressureCategory, BloodPressureStatus, CategoryName, RiskLevel,
};

/// WHO 2023 classification table, indexed in [`CategoryName::ALL`] order
pub static WHO_BP_CATEGORIES: [BloodPressureCategory; 8] = [
    BloodPressureCategory {
        name: CategoryName::Optimal,
        label: "Optimale",
        systolic_range: "<120",
        diastolic_range: "<80",
        color: "text-green-700",
        bg_color: "bg-green-50",
        border_color: "border-green-200",
        risk_level: RiskLevel::Low,
        recommendations: &[
            "Maintenir un mode de vie sain",
            "Activité physique régulière",
            "Alimentation équilibrée",
            "Contrôle annuel recommandé",
        ],
    },
    BloodPressureCategory {
        name: CategoryName::Normal,
        label: "Normale",
        systolic_range: "120-129",
        diastolic_range: "80-84",
        color: "text-green-600",
        bg_color: "bg-green-50",
        border_color: "border-green-200",
        risk_level: RiskLevel::Low,
        recommendations: &[
            "Continuer les habitudes saines",
            "Surveillance annuelle",
            "Prévention primaire",
        ],
    },
    BloodPressureCategory {
        name: CategoryName::HighNormal,
        label: "Normale-Haute",
        systolic_range: "130-139",
        diastolic_range: "85-89",
        color: "text-yellow-700",
        bg_color: "bg-yellow-50",
        border_color: "border-yellow-200",
        risk_level: RiskLevel::Moderate,
        recommendations: &[
            "Surveillance renforcée",
            "Modification du mode de vie",
            "Réduction du sel",
            "Contrôle tous les 6 mois",
        ],
    },
    BloodPressureCategory {
        name: CategoryName::Grade1,
        label: "HTA Grade 1",
        systolic_range: "140-159",
        diastolic_range: "90-99",
        color: "text-orange-700",
        bg_color: "bg-orange-50",
        border_color: "border-orange-200",
        risk_level: RiskLevel::High,
        recommendations: &[
            "Consultation médicale nécessaire",
            "Évaluation du risque cardiovasculaire",
            "Modification du mode de vie",
            "Considérer un traitement antihypertenseur",
        ],
    },
    BloodPressureCategory {
        name: CategoryName::Grade2,
        label: "HTA Grade 2",
        systolic_range: "160-179",
        diastolic_range: "100-109",
        color: "text-red-700",
        bg_color: "bg-red-50",
        border_color: "border-red-200",
        risk_level: RiskLevel::Critical,
        recommendations: &[
            "Consultation médicale urgente",
            "Traitement antihypertenseur recommandé",
            "Surveillance rapprochée",
            "Évaluation complète des organes cibles",
        ],
    },
    BloodPressureCategory {
        name: CategoryName::Grade3,
        label: "HTA Grade 3",
        systolic_range: "≥180",
        diastolic_range: "≥110",
        color: "text-red-800",
        bg_color: "bg-red-100",
        border_color: "border-red-300",
        risk_level: RiskLevel::Critical,
        recommendations: &[
            "URGENCE MÉDICALE",
            "Consultation immédiate requise",
            "Traitement antihypertenseur immédiat",
            "Hospitalisation possible",
        ],
    },
    BloodPressureCategory {
        name: CategoryName::IsolatedSystolic,
        label: "HTA Systolique Isolée",
        systolic_range: "≥140",
        diastolic_range: "<90",
        color: "text-purple-700",
        bg_color: "bg-purple-50",
        border_color: "border-purple-200",
        risk_level: RiskLevel::High,
        recommendations: &[
            "Fréquent chez les personnes âgées",
            "Consultation médicale nécessaire",
            "Évaluation du risque cardiovasculaire",
            "Traitement selon les guidelines",
        ],
    },
    BloodPressureCategory {
        name: CategoryName::IsolatedDiastolic,
        label: "HTA Diastolique Isolée",
        systolic_range: "<140",
        diastolic_range: "≥90",
        color: "text-indigo-700",
        bg_color: "bg-indigo-50",
        border_color: "border-indigo-200",
        risk_level: RiskLevel::High,
        recommendations: &[
            "Plus fréquent chez les jeunes",
            "Consultation médicale nécessaire",
            "Surveillance régulière",
            "Modification du mode de vie",
        ],
    },
];

/// Look up the table row for a category
pub fn category(name: CategoryName) -> &'static BloodPressureCategory {
    &WHO_BP_CATEGORIES[name as usize]
}

/// Classify a reading.
///
/// Rules are checked in order and the first match wins. The isolated patterns
/// come first so that e.g. 150/70 is reported as isolated systolic hypertension
/// rather than grade 1. Within the grading ladder either value alone is enough
/// to escalate. Out-of-range input is not rejected; anything unmatched is optimal.
pub fn classify(systolic: i32, diastolic: i32) -> &'static BloodPressureCategory {
    let name = if systolic >= 140 && diastolic < 90 {
        CategoryName::IsolatedSystolic
    } else if systolic < 140 && diastolic >= 90 {
        CategoryName::IsolatedDiastolic
    } else if systolic >= 180 || diastolic >= 110 {
        CategoryName::Grade3
    } else if (160..=179).contains(&systolic) || (100..=109).contains(&diastolic) {
        CategoryName::Grade2
    } else if (140..=159).contains(&systolic) || (90..=99).contains(&diastolic) {
        CategoryName::Grade1
    } else if (130..=139).contains(&systolic) || (85..=89).contains(&diastolic) {
        CategoryName::HighNormal
    } else if (120..=129).contains(&systolic) && (80..=84).contains(&diastolic) {
        CategoryName::Normal
    } else {
        CategoryName::Optimal
    };

    category(name)
}

/// Classify a reading and derive the urgency flags
pub fn blood_pressure_status(systolic: i32, diastolic: i32) -> BloodPressureStatus {
    BloodPressureStatus::from(classify(systolic, diastolic))
}

/// Canonical display string, e.g. `128/82 mmHg`
pub fn format_blood_pressure(systolic: i32, diastolic: i32) -> String {
    format!("{}/{} mmHg", systolic, diastolic)
}
