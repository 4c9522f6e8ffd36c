//! Static modality registry.
//!
//! Maps each teaching modality to the ordered moments that make up its
//! lesson structure. The table is built once on first use and never
//! mutated afterwards.

use once_cell::sync::Lazy;

use crate::error::PlanError;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// One row of a modality's moments table: the label printed in the document
/// and the key used to look up the caller's description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MomentSpec {
    pub label: String,
    pub key: String,
}

impl MomentSpec {
    fn new(label: &str, key: &str) -> Self {
        Self {
            label: label.into(),
            key: key.into(),
        }
    }
}

/// A teaching modality and its ordered moments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Modality {
    pub name: String,
    pub moments: Vec<MomentSpec>,
}

impl Modality {
    /// Download filename for documents generated with this modality.
    pub fn file_name(&self) -> String {
        format!(
            "planeacion_{}.docx",
            self.name.to_lowercase().replace(' ', "_")
        )
    }
}

/// Immutable lookup table from modality name to its moments.
#[derive(Debug, Clone)]
pub struct ModalityRegistry {
    modalities: Vec<Modality>,
    /// Alternate spellings accepted from older clients: (alias, canonical name).
    aliases: Vec<(String, String)>,
}

// ---------------------------------------------------------------------------
// Registry data
// ---------------------------------------------------------------------------

fn game_based_moments() -> Vec<MomentSpec> {
    vec![
        MomentSpec::new("Planteamiento del Juego", "planteamiento_juego"),
        MomentSpec::new("Desarrollo de las Actividades", "desarrollo_actividades"),
        MomentSpec::new("Compartamos la Experiencia", "compartamos_experiencia"),
        MomentSpec::new("Comunidad de Juego", "comunidad_juego"),
    ]
}

static REGISTRY: Lazy<ModalityRegistry> = Lazy::new(ModalityRegistry::builtin);

impl ModalityRegistry {
    /// Process-wide registry.
    pub fn global() -> &'static ModalityRegistry {
        &REGISTRY
    }

    /// Build a registry from explicit entries.
    pub fn new(modalities: Vec<Modality>, aliases: Vec<(String, String)>) -> Self {
        Self {
            modalities,
            aliases,
        }
    }

    /// The built-in modality table.
    pub fn builtin() -> Self {
        let modalities = vec![
            Modality {
                name: "ABJ".into(),
                moments: game_based_moments(),
            },
            Modality {
                name: "Aprendizaje Basado en Juegos".into(),
                moments: game_based_moments(),
            },
            Modality {
                name: "Centros de Interés".into(),
                moments: vec![
                    MomentSpec::new("En contacto de la realidad", "contacto_realidad"),
                    MomentSpec::new("Identificación e integración", "identificacion_integracion"),
                    MomentSpec::new("Expresión", "expresion"),
                ],
            },
            Modality {
                name: "Proyecto".into(),
                moments: vec![
                    MomentSpec::new("Punto de partida", "punto_partida"),
                    MomentSpec::new("Planeación", "planeacion"),
                    MomentSpec::new("¡A trabajar!", "a_trabajar"),
                    MomentSpec::new("Comunicamos nuestros logros", "comunicamos_logros"),
                    MomentSpec::new("Reflexión sobre el aprendizaje", "reflexion_aprendizaje"),
                ],
            },
            Modality {
                name: "Rincones de Aprendizaje".into(),
                moments: vec![
                    MomentSpec::new("Punto de partida (Saberes previos)", "punto_partida"),
                    MomentSpec::new("Asamblea inicial y planeación", "asamblea_inicial"),
                    MomentSpec::new("Exploración de los rincones", "exploracion_rincones"),
                    MomentSpec::new("Exploración y descubrimiento", "exploracion_descubrimiento"),
                    MomentSpec::new("Compartimos lo aprendido", "compartimos_aprendido"),
                    MomentSpec::new("Evaluamos la experiencia", "evaluamos_experiencia"),
                ],
            },
            Modality {
                name: "Taller Crítico".into(),
                moments: vec![
                    MomentSpec::new("Situación inicial", "situacion_inicial"),
                    MomentSpec::new("Organización de las acciones", "organizacion_acciones"),
                    MomentSpec::new("Puesta en marcha", "puesta_marcha"),
                    MomentSpec::new("Valoramos lo aprendido", "valoramos_aprendido"),
                ],
            },
            Modality {
                name: "Unidad Didáctica".into(),
                moments: vec![
                    MomentSpec::new("Lectura de la realidad", "lectura_realidad"),
                    MomentSpec::new(
                        "Identificación de la trama y complejidad",
                        "identificacion_trama",
                    ),
                    MomentSpec::new("Planificación y organización del trabajo", "planificacion"),
                    MomentSpec::new("Exploración y descubrimiento", "exploracion"),
                    MomentSpec::new("Participación activa y horizontal", "participacion"),
                    MomentSpec::new("Conclusión de la experiencia (Valoración)", "conclusion"),
                ],
            },
        ];

        let aliases = [
            ("centros", "Centros de Interés"),
            ("centros de interes", "Centros de Interés"),
            ("talleres", "Taller Crítico"),
            ("taller critico", "Taller Crítico"),
            ("rincones", "Rincones de Aprendizaje"),
            ("unidad", "Unidad Didáctica"),
            ("unidad didactica", "Unidad Didáctica"),
        ]
        .into_iter()
        .map(|(alias, name)| (alias.to_string(), name.to_string()))
        .collect();

        Self::new(modalities, aliases)
    }

    // -----------------------------------------------------------------------
    // Lookup
    // -----------------------------------------------------------------------

    /// Resolve a caller-supplied modality name.
    ///
    /// Tries an exact match first, then a case-insensitive one, then the
    /// alias table. Surrounding whitespace is ignored. Fails with
    /// [`PlanError::UnknownModality`] listing every registry key.
    pub fn resolve(&self, raw: &str) -> Result<&Modality, PlanError> {
        let trimmed = raw.trim();

        if let Some(m) = self.modalities.iter().find(|m| m.name == trimmed) {
            return Ok(m);
        }

        let needle = fold(trimmed);
        if let Some(m) = self.modalities.iter().find(|m| fold(&m.name) == needle) {
            return Ok(m);
        }

        let canonical = self
            .aliases
            .iter()
            .find(|(alias, _)| fold(alias) == needle)
            .map(|(_, name)| name.as_str());
        if let Some(name) = canonical
            && let Some(m) = self.modalities.iter().find(|m| m.name == name)
        {
            return Ok(m);
        }

        Err(PlanError::UnknownModality {
            requested: raw.to_string(),
            available: self.names(),
        })
    }

    /// Registry keys in declaration order.
    pub fn names(&self) -> Vec<String> {
        self.modalities.iter().map(|m| m.name.clone()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Modality> {
        self.modalities.iter()
    }

    pub fn len(&self) -> usize {
        self.modalities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modalities.is_empty()
    }
}

fn fold(s: &str) -> String {
    s.trim().to_lowercase()
}
