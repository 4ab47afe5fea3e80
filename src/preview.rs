//! Preview projection of the form state
//!
//! A declarative section/row schema is projected against the live field
//! values to produce the human-readable summary shown on the review step.
//! The projection is deterministic and side-effect free: identical form
//! state always yields identical, order-stable output.

use crate::format;
use crate::state::FormStore;

/// Where a preview row reads its value from.
#[derive(Debug, Clone, Copy)]
pub enum RowSource {
    /// A single named field.
    Field(&'static str),
    /// Several fields joined by a separator; empty parts are dropped first.
    Joined(&'static [&'static str], &'static str),
}

/// Display transform applied to a row's value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowTransform {
    /// Substitute a select field's raw value with its display label;
    /// unknown raw values pass through verbatim.
    SelectLabel,
    /// Render a canonical decimal string as BRL currency.
    Currency,
}

/// One row of a preview section.
#[derive(Debug, Clone, Copy)]
pub struct RowSpec {
    pub label: &'static str,
    pub source: RowSource,
    pub transform: Option<RowTransform>,
}

/// One section of the preview schema.
#[derive(Debug, Clone, Copy)]
pub struct SectionSpec {
    pub title: &'static str,
    pub rows: &'static [RowSpec],
}

/// A projected row, ready for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewRow {
    pub label: String,
    pub value: String,
}

/// A projected section; never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewSection {
    pub title: String,
    pub rows: Vec<PreviewRow>,
}

const fn row(label: &'static str, name: &'static str) -> RowSpec {
    RowSpec {
        label,
        source: RowSource::Field(name),
        transform: None,
    }
}

const fn select_row(label: &'static str, name: &'static str) -> RowSpec {
    RowSpec {
        label,
        source: RowSource::Field(name),
        transform: Some(RowTransform::SelectLabel),
    }
}

const SCHEMA: &[SectionSpec] = &[
    SectionSpec {
        title: "📋 Razão Social",
        rows: &[
            row("Opção 1 — Preferencial", "razao_social_1"),
            row("Opção 2", "razao_social_2"),
            row("Opção 3", "razao_social_3"),
            row("Nome Fantasia", "nome_fantasia"),
        ],
    },
    SectionSpec {
        title: "📍 Endereço",
        rows: &[
            row("CEP", "cep"),
            row("Rua", "rua"),
            row("Número", "numero"),
            row("Complemento", "complemento"),
            row("Bairro", "bairro"),
            RowSpec {
                label: "Cidade / UF",
                source: RowSource::Joined(&["cidade", "uf"], " — "),
                transform: None,
            },
        ],
    },
    SectionSpec {
        title: "🏢 Imóvel",
        rows: &[
            row("Inscrição Imobiliária", "inscricao_imobiliaria"),
            row("Área (m²)", "area_m2"),
            select_row("Tipo de Imóvel", "tipo_imovel"),
        ],
    },
    SectionSpec {
        title: "🔍 Atividade Econômica (CNAE)",
        rows: &[
            row("Código CNAE", "cnae_codigo"),
            row("Descrição", "cnae_descricao"),
            row("Ramo (manual)", "ramo_descricao"),
        ],
    },
    SectionSpec {
        title: "💰 Capital Social",
        rows: &[
            RowSpec {
                label: "Valor (R$)",
                source: RowSource::Field("valor_capital"),
                transform: Some(RowTransform::Currency),
            },
            select_row("Integralização", "tipo_integralizacao"),
            row("Data Limite", "data_limite"),
            select_row("Meio", "meio_integralizacao"),
        ],
    },
    SectionSpec {
        title: "📬 Contato",
        rows: &[row("E-mail", "email"), row("Telefone", "telefone")],
    },
];

/// Document fields listed in the trailing attachments section.
const DOCUMENT_FIELDS: &[(&str, &str)] = &[
    ("doc_identidade", "Identidade"),
    ("doc_residencia", "Residência"),
    ("doc_certidao", "Certidão"),
];

/// The intake form's preview schema.
pub fn schema() -> &'static [SectionSpec] {
    SCHEMA
}

/// Display label for a select field's raw value, when one is known.
fn select_label(field: &str, raw: &str) -> Option<&'static str> {
    let table: &[(&str, &str)] = match field {
        "tipo_imovel" => crate::state::TIPO_IMOVEL,
        "tipo_integralizacao" => crate::state::TIPO_INTEGRALIZACAO,
        "meio_integralizacao" => crate::state::MEIO_INTEGRALIZACAO,
        _ => return None,
    };
    table
        .iter()
        .copied()
        .find(|(v, _)| *v == raw)
        .map(|(_, label)| label)
}

/// Project the form state through the schema.
///
/// Rows with empty values are skipped; sections whose rows were all skipped
/// are omitted. A trailing documents section lists attachment names, omitted
/// when nothing is attached.
pub fn project(form: &FormStore, schema: &[SectionSpec]) -> Vec<PreviewSection> {
    let mut sections: Vec<PreviewSection> = schema
        .iter()
        .filter_map(|section| {
            let rows: Vec<PreviewRow> = section
                .rows
                .iter()
                .filter_map(|spec| project_row(form, spec))
                .collect();
            if rows.is_empty() {
                None
            } else {
                Some(PreviewSection {
                    title: section.title.to_string(),
                    rows,
                })
            }
        })
        .collect();

    let documents: Vec<PreviewRow> = DOCUMENT_FIELDS
        .iter()
        .flat_map(|(name, label)| {
            form.attachments(name).iter().map(|attachment| PreviewRow {
                label: (*label).to_string(),
                value: format!("📎 {}", attachment.name),
            })
        })
        .collect();
    if !documents.is_empty() {
        sections.push(PreviewSection {
            title: "📄 Documentos".to_string(),
            rows: documents,
        });
    }

    sections
}

fn project_row(form: &FormStore, spec: &RowSpec) -> Option<PreviewRow> {
    let raw = match spec.source {
        // A field that counts as unfilled (a zero currency amount included)
        // never produces a row.
        RowSource::Field(name) if form.is_empty(name) => return None,
        RowSource::Field(name) => form.stored(name).trim().to_string(),
        RowSource::Joined(names, separator) => names
            .iter()
            .map(|name| form.stored(name).trim())
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(separator),
    };
    if raw.is_empty() {
        return None;
    }

    let value = match (spec.transform, spec.source) {
        (Some(RowTransform::SelectLabel), RowSource::Field(name)) => select_label(name, &raw)
            .map(str::to_string)
            .unwrap_or(raw),
        (Some(RowTransform::Currency), _) => format::format_brl_display(&raw),
        _ => raw,
    };

    Some(PreviewRow {
        label: spec.label.to_string(),
        value,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample_form() -> FormStore {
        let mut form = FormStore::intake();
        form.set_text("razao_social_1", "Empresa Exemplo Ltda");
        form.set_text("cep", "01310-100");
        form.set_text("rua", "Av. Paulista");
        form.set_text("cidade", "São Paulo");
        form.set_text("uf", "SP");
        form.set_text("tipo_imovel", "sala");
        form
    }

    #[test]
    fn test_empty_form_projects_nothing() {
        let form = FormStore::intake();
        assert!(project(&form, schema()).is_empty());
    }

    #[test]
    fn test_empty_rows_are_skipped() {
        let form = sample_form();
        let sections = project(&form, schema());
        let razao = sections.iter().find(|s| s.title.contains("Razão")).unwrap();
        // Only opção 1 was filled; the other three rows are gone.
        assert_eq!(razao.rows.len(), 1);
        assert_eq!(razao.rows[0].label, "Opção 1 — Preferencial");
    }

    #[test]
    fn test_sections_with_no_rows_are_omitted() {
        let form = sample_form();
        let sections = project(&form, schema());
        assert!(!sections.iter().any(|s| s.title.contains("Contato")));
        assert!(!sections.iter().any(|s| s.title.contains("Documentos")));
    }

    #[test]
    fn test_joined_row_uses_separator() {
        let form = sample_form();
        let sections = project(&form, schema());
        let endereco = sections.iter().find(|s| s.title.contains("Endereço")).unwrap();
        let cidade_uf = endereco.rows.iter().find(|r| r.label == "Cidade / UF").unwrap();
        assert_eq!(cidade_uf.value, "São Paulo — SP");
    }

    #[test]
    fn test_joined_row_drops_empty_parts() {
        let mut form = sample_form();
        form.set_text("uf", "");
        let sections = project(&form, schema());
        let endereco = sections.iter().find(|s| s.title.contains("Endereço")).unwrap();
        let cidade_uf = endereco.rows.iter().find(|r| r.label == "Cidade / UF").unwrap();
        assert_eq!(cidade_uf.value, "São Paulo");
    }

    #[test]
    fn test_select_value_substituted_with_label() {
        let form = sample_form();
        let sections = project(&form, schema());
        let imovel = sections.iter().find(|s| s.title.contains("Imóvel")).unwrap();
        let tipo = imovel.rows.iter().find(|r| r.label == "Tipo de Imóvel").unwrap();
        assert_eq!(tipo.value, "Sala Comercial");
    }

    #[test]
    fn test_unknown_select_value_passes_through() {
        let mut form = sample_form();
        form.set_text("tipo_imovel", "chalé");
        let sections = project(&form, schema());
        let imovel = sections.iter().find(|s| s.title.contains("Imóvel")).unwrap();
        let tipo = imovel.rows.iter().find(|r| r.label == "Tipo de Imóvel").unwrap();
        assert_eq!(tipo.value, "chalé");
    }

    #[test]
    fn test_currency_row_renders_brl() {
        let mut form = sample_form();
        let capital = form.get_mut("valor_capital").unwrap();
        for c in "100000".chars() {
            capital.push_char(c);
        }
        let sections = project(&form, schema());
        let capital = sections.iter().find(|s| s.title.contains("Capital")).unwrap();
        assert_eq!(capital.rows[0].value, "R$ 1.000,00");
    }

    #[test]
    fn test_documents_section_lists_attachments() {
        let mut form = sample_form();
        let doc = form.get_mut("doc_identidade").unwrap();
        for c in "/docs/rg.pdf".chars() {
            doc.push_char(c);
        }
        doc.attach_input();
        let sections = project(&form, schema());
        let docs = sections.last().unwrap();
        assert_eq!(docs.title, "📄 Documentos");
        assert_eq!(docs.rows.len(), 1);
        assert_eq!(docs.rows[0].label, "Identidade");
        assert_eq!(docs.rows[0].value, "📎 rg.pdf");
    }

    #[test]
    fn test_projection_is_deterministic() {
        let form = sample_form();
        let first = project(&form, schema());
        let second = project(&form, schema());
        assert_eq!(first, second);
    }
}
