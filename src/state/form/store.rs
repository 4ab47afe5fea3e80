//! The single owned collection of form fields
//!
//! Every component reads and writes field state through this store; nothing
//! keeps an independent copy. Field order matches the order the wizard
//! presents them in.

use super::field::{FieldValue, FileAttachment, FormField, SelectOption};
use crate::format::Mask;

/// Options of the `tipo_imovel` select.
pub const TIPO_IMOVEL: &[SelectOption] = &[
    ("sala", "Sala Comercial"),
    ("galpao", "Galpão"),
    ("loja", "Loja"),
    ("casa", "Casa Comercial"),
];

/// Options of the `tipo_integralizacao` select.
pub const TIPO_INTEGRALIZACAO: &[SelectOption] = &[
    ("ato", "Integralizado No Ato (À Vista)"),
    ("prazo", "A Integralizar (Em Prazo Futuro)"),
];

/// Options of the `meio_integralizacao` select.
pub const MEIO_INTEGRALIZACAO: &[SelectOption] = &[
    ("dinheiro", "Moeda Corrente (Dinheiro)"),
    ("bens", "Bens (Móveis / Imóveis)"),
];

/// The live field values of one intake form
#[derive(Debug, Clone)]
pub struct FormStore {
    fields: Vec<FormField>,
}

impl FormStore {
    /// Build the store with the full business-registration roster
    pub fn intake() -> Self {
        let fields = vec![
            // Razão social
            FormField::text("razao_social_1", "Opção 1 — Preferencial", true),
            FormField::text("razao_social_2", "Opção 2", false),
            FormField::text("razao_social_3", "Opção 3", false),
            FormField::text("nome_fantasia", "Nome Fantasia", false),
            // Endereço
            FormField::masked("cep", "CEP", true, Mask::Cep),
            FormField::text("rua", "Rua / Logradouro", true),
            FormField::text("numero", "Número", true),
            FormField::text("complemento", "Complemento", false),
            FormField::text("bairro", "Bairro", true),
            FormField::text("cidade", "Cidade", true),
            FormField::text("uf", "UF", true),
            // Imóvel
            FormField::masked(
                "inscricao_imobiliaria",
                "Inscrição Imobiliária",
                false,
                Mask::PropertyRegistration,
            ),
            FormField::text("area_m2", "Área (m²)", true),
            FormField::select("tipo_imovel", "Tipo de Imóvel", true, TIPO_IMOVEL),
            // Atividade econômica
            FormField::text("cnae_search", "Buscar CNAE", false),
            FormField::text("cnae_codigo", "Código CNAE", false),
            FormField::text("cnae_descricao", "Descrição CNAE", false),
            FormField::toggle("cnae_definir", "Definir ramo manualmente"),
            FormField::multiline("ramo_descricao", "Descrição do Ramo", false),
            // Capital social
            FormField::currency("valor_capital", "Valor do Capital (R$)", true),
            FormField::select(
                "tipo_integralizacao",
                "Integralização",
                true,
                TIPO_INTEGRALIZACAO,
            ),
            FormField::text("data_limite", "Data Limite (AAAA-MM-DD)", false),
            FormField::select("meio_integralizacao", "Meio", true, MEIO_INTEGRALIZACAO),
            // Contato
            FormField::text("email", "E-mail Corporativo", true),
            FormField::masked("telefone", "Telefone / WhatsApp", true, Mask::Phone),
            // Documentos
            FormField::files("doc_identidade", "Documento de Identidade", true),
            FormField::files("doc_residencia", "Comprovante de Residência", true),
            FormField::files("doc_certidao", "Certidão", true),
        ];
        Self { fields }
    }

    /// Look up a field by name
    pub fn get(&self, name: &str) -> Option<&FormField> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Look up a field mutably by name
    pub fn get_mut(&mut self, name: &str) -> Option<&mut FormField> {
        self.fields.iter_mut().find(|f| f.name == name)
    }

    /// Stored value of a named field, empty string when absent
    pub fn stored(&self, name: &str) -> &str {
        self.get(name).map(FormField::stored_value).unwrap_or("")
    }

    /// Whether a named toggle field is checked
    pub fn toggle_on(&self, name: &str) -> bool {
        matches!(
            self.get(name).map(|f| &f.value),
            Some(FieldValue::Toggle(true))
        )
    }

    /// Whether a named field is empty (missing fields count as empty)
    pub fn is_empty(&self, name: &str) -> bool {
        self.get(name).map(FormField::is_empty).unwrap_or(true)
    }

    /// Overwrite the stored text of a named field
    pub fn set_text(&mut self, name: &str, value: impl Into<String>) {
        if let Some(field) = self.get_mut(name) {
            field.set_text(value);
        }
    }

    /// Flip the `required` flag of a named field
    pub fn set_required(&mut self, name: &str, required: bool) {
        if let Some(field) = self.get_mut(name) {
            field.required = required;
        }
    }

    /// Attachments of a named file field
    pub fn attachments(&self, name: &str) -> &[FileAttachment] {
        match self.get(name).map(|f| &f.value) {
            Some(FieldValue::Files { attachments, .. }) => attachments,
            _ => &[],
        }
    }

    /// Serialize the form for submission: text parts with canonical stored
    /// values, plus one file part per attachment.
    ///
    /// The CNAE search box is adapter scratch space and is not submitted; an
    /// unchecked toggle is omitted the way an unchecked checkbox would be.
    pub fn payload_parts(&self) -> (Vec<(String, String)>, Vec<(String, FileAttachment)>) {
        let mut texts = Vec::new();
        let mut files = Vec::new();
        for field in &self.fields {
            if field.name == "cnae_search" {
                continue;
            }
            match &field.value {
                FieldValue::Files { attachments, .. } => {
                    for attachment in attachments {
                        files.push((field.name.to_string(), attachment.clone()));
                    }
                }
                FieldValue::Toggle(on) => {
                    if *on {
                        texts.push((field.name.to_string(), "on".to_string()));
                    }
                }
                _ => texts.push((field.name.to_string(), field.stored_value().to_string())),
            }
        }
        (texts, files)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_roster_has_expected_fields() {
        let form = FormStore::intake();
        for name in [
            "razao_social_1",
            "cep",
            "uf",
            "tipo_imovel",
            "cnae_codigo",
            "cnae_definir",
            "valor_capital",
            "telefone",
            "doc_certidao",
        ] {
            assert!(form.get(name).is_some(), "missing field {name}");
        }
    }

    #[test]
    fn test_stored_of_missing_field_is_empty() {
        let form = FormStore::intake();
        assert_eq!(form.stored("nope"), "");
        assert!(form.is_empty("nope"));
    }

    #[test]
    fn test_set_required_flips_flag() {
        let mut form = FormStore::intake();
        assert!(!form.get("data_limite").unwrap().required);
        form.set_required("data_limite", true);
        assert!(form.get("data_limite").unwrap().required);
    }

    #[test]
    fn test_payload_skips_search_box_and_unchecked_toggle() {
        let form = FormStore::intake();
        let (texts, files) = form.payload_parts();
        assert!(texts.iter().all(|(name, _)| name != "cnae_search"));
        assert!(texts.iter().all(|(name, _)| name != "cnae_definir"));
        assert!(files.is_empty());
    }

    #[test]
    fn test_payload_includes_checked_toggle_and_attachments() {
        let mut form = FormStore::intake();
        form.get_mut("cnae_definir").unwrap().push_char(' ');
        let doc = form.get_mut("doc_identidade").unwrap();
        for c in "/docs/rg.pdf".chars() {
            doc.push_char(c);
        }
        doc.attach_input();

        let (texts, files) = form.payload_parts();
        assert!(texts.contains(&("cnae_definir".to_string(), "on".to_string())));
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].0, "doc_identidade");
        assert_eq!(files[0].1.name, "rg.pdf");
    }

    #[test]
    fn test_payload_sends_canonical_currency() {
        let mut form = FormStore::intake();
        let capital = form.get_mut("valor_capital").unwrap();
        for c in "250000".chars() {
            capital.push_char(c);
        }
        let (texts, _) = form.payload_parts();
        let value = texts
            .iter()
            .find(|(name, _)| name == "valor_capital")
            .map(|(_, v)| v.as_str());
        assert_eq!(value, Some("2500.00"));
    }
}
