//! Wizard step machine and per-step gating validation

use super::form::FormStore;

/// One step of the wizard: its title, the fields it contains, and the rule
/// that gates forward navigation out of it.
#[derive(Debug, Clone, Copy)]
pub struct StepDefinition {
    pub title: &'static str,
    pub fields: &'static [&'static str],
    pub rule: StepRule,
}

/// Validation rule applied to a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepRule {
    /// Every required field in the step must be non-empty.
    Required,
    /// Required fields, plus the activity-code disjunction: a selected CNAE
    /// code, or the manual toggle checked with a non-empty description.
    ActivityCode,
}

/// The intake wizard's step roster, in presentation order. The final step is
/// the review/preview step and carries no fields of its own.
pub const STEPS: &[StepDefinition] = &[
    StepDefinition {
        title: "Razão Social",
        fields: &[
            "razao_social_1",
            "razao_social_2",
            "razao_social_3",
            "nome_fantasia",
        ],
        rule: StepRule::Required,
    },
    StepDefinition {
        title: "Endereço",
        fields: &["cep", "rua", "numero", "complemento", "bairro", "cidade", "uf"],
        rule: StepRule::Required,
    },
    StepDefinition {
        title: "Imóvel",
        fields: &["inscricao_imobiliaria", "area_m2", "tipo_imovel"],
        rule: StepRule::Required,
    },
    StepDefinition {
        title: "Atividade Econômica",
        fields: &[
            "cnae_search",
            "cnae_codigo",
            "cnae_descricao",
            "cnae_definir",
            "ramo_descricao",
        ],
        rule: StepRule::ActivityCode,
    },
    StepDefinition {
        title: "Capital Social",
        fields: &[
            "valor_capital",
            "tipo_integralizacao",
            "data_limite",
            "meio_integralizacao",
        ],
        rule: StepRule::Required,
    },
    StepDefinition {
        title: "Contato",
        fields: &["email", "telefone"],
        rule: StepRule::Required,
    },
    StepDefinition {
        title: "Documentos",
        fields: &["doc_identidade", "doc_residencia", "doc_certidao"],
        rule: StepRule::Required,
    },
    StepDefinition {
        title: "Revisão",
        fields: &[],
        rule: StepRule::Required,
    },
];

/// Marker state of one step-position indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepMarker {
    Done,
    Active,
    Upcoming,
}

/// Wizard position: `current` moves by ±1 only, clamped to `[1, total]`.
#[derive(Debug, Clone)]
pub struct WizardState {
    current: usize,
    total: usize,
}

impl WizardState {
    pub fn new(total: usize) -> Self {
        Self { current: 1, total }
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn is_first(&self) -> bool {
        self.current == 1
    }

    pub fn is_last(&self) -> bool {
        self.current == self.total
    }

    /// Move forward one step; no-op on the last step
    pub fn advance(&mut self) {
        if self.current < self.total {
            self.current += 1;
        }
    }

    /// Move back one step; no-op on the first step
    pub fn retreat(&mut self) {
        if self.current > 1 {
            self.current -= 1;
        }
    }

    /// Completion ratio of the current position
    pub fn progress(&self) -> f64 {
        self.current as f64 / self.total as f64
    }

    /// Step-position label, e.g. "Etapa 2 de 8"
    pub fn label(&self) -> String {
        format!("Etapa {} de {}", self.current, self.total)
    }

    /// Ordered markers for the step-dot indicators
    pub fn markers(&self) -> Vec<StepMarker> {
        (1..=self.total)
            .map(|i| {
                if i < self.current {
                    StepMarker::Done
                } else if i == self.current {
                    StepMarker::Active
                } else {
                    StepMarker::Upcoming
                }
            })
            .collect()
    }

    /// Definition of the active step
    pub fn active_step(&self) -> &'static StepDefinition {
        &STEPS[self.current - 1]
    }
}

impl Default for WizardState {
    fn default() -> Self {
        Self::new(STEPS.len())
    }
}

/// Decide whether the active step passes validation.
///
/// Pure over the live field values: no mutation, no memory between calls.
pub fn step_valid(step: &StepDefinition, form: &FormStore) -> bool {
    let required_met = step
        .fields
        .iter()
        .filter(|name| form.get(name).map(|f| f.required).unwrap_or(false))
        .all(|name| !form.is_empty(name));

    match step.rule {
        StepRule::Required => required_met,
        StepRule::ActivityCode => {
            let code_selected = !form.is_empty("cnae_codigo");
            let manual = form.toggle_on("cnae_definir") && !form.is_empty("ramo_descricao");
            required_met && (code_selected || manual)
        }
    }
}

/// The fields of a step the user can focus, in presentation order.
///
/// The CNAE code/description pair is written by the lookup adapter, and the
/// conditional fields only appear while the selection that reveals them
/// holds.
pub fn focusable_fields(step: &StepDefinition, form: &FormStore) -> Vec<&'static str> {
    step.fields
        .iter()
        .copied()
        .filter(|name| match *name {
            "cnae_codigo" | "cnae_descricao" => false,
            "ramo_descricao" => form.toggle_on("cnae_definir"),
            "data_limite" => form.stored("tipo_integralizacao") == "prazo",
            _ => true,
        })
        .collect()
}
