//! Prompt templates.
//!
//! Each category maps to a static template; the shared rules are appended to
//! every generation prompt.

use crate::domain::Category;

/// Marker for an abridged quotation
pub const ELLIPSIS_MARKER: &str = "[...]";

/// Honorific written after the Prophet's name
pub const HONORIFIC: &str = "(ﷺ)";

/// Opening phrase of every condensed hadith
pub const ANALYSIS_INTRO: &str = "Le Prophète (ﷺ) a dit :";

/// Character budget of a condensed hadith
pub const ANALYSIS_MAX_CHARS: usize = 300;

/// Per-category generation template
#[derive(Debug, PartialEq, Eq)]
pub struct PromptTemplate {
    /// What to produce
    pub subject: &'static str,

    /// Expected shape of the `source` field
    pub source_format: &'static str,

    /// Character budget of `content`
    pub max_chars: usize,

    /// How a topic is woven in
    pub topic_clause: &'static str,
}

static HADITH: PromptTemplate = PromptTemplate {
    subject: "un hadith authentique du Prophète Muhammad (ﷺ)",
    source_format: "le recueil et le numéro, par exemple \"Sahih al-Bukhari 6018\"",
    max_chars: 300,
    topic_clause: "Le hadith doit porter sur le thème",
};

static QURAN: PromptTemplate = PromptTemplate {
    subject: "un verset du Saint Coran en traduction française",
    source_format: "le nom de la sourate et le numéro du verset, par exemple \"Al-Baqara 2:286\"",
    max_chars: 250,
    topic_clause: "Le verset doit porter sur le thème",
};

static RAMADAN: PromptTemplate = PromptTemplate {
    subject: "un rappel authentique sur le mois de Ramadan (hadith ou verset)",
    source_format: "le recueil et le numéro, ou la sourate et le verset",
    max_chars: 300,
    topic_clause: "Le rappel doit porter sur le thème",
};

static THEMATIC: PromptTemplate = PromptTemplate {
    subject: "un hadith authentique ou un verset du Coran",
    source_format: "le recueil et le numéro, ou la sourate et le verset",
    max_chars: 300,
    topic_clause: "Le texte doit illustrer directement le thème",
};

static RESEARCH: PromptTemplate = PromptTemplate {
    subject: "un hadith authentique du Prophète Muhammad (ﷺ)",
    source_format: "le recueil et le numéro, par exemple \"Sahih Muslim 2699\"",
    max_chars: 300,
    topic_clause: "Le hadith doit répondre à la recherche",
};

/// Template of a category
pub fn template_for(category: Category) -> &'static PromptTemplate {
    match category {
        Category::Hadith => &HADITH,
        Category::Quran => &QURAN,
        Category::Ramadan => &RAMADAN,
        Category::Thematic => &THEMATIC,
        Category::ResearchAi => &RESEARCH,
    }
}

/// What `content` holds in a fresh generation
const QUOTE_ONLY: &str = "contient uniquement le texte cité, sans introduction ni explication,";

/// Rules appended to every JSON prompt; `content_rule` describes the `content` field
fn shared_rules(content_rule: &str, max_chars: usize) -> String {
    format!(
        "Règles impératives :\n\
         - Réponds uniquement en français.\n\
         - Écris toujours \"Allah\" pour le nom divin, jamais \"Dieu\".\n\
         - Après chaque mention du Prophète, ajoute {honorific}.\n\
         - Le champ \"content\" {content_rule} et ne dépasse pas {max_chars} caractères.\n\
         - Si tu abrèges une citation, marque chaque coupure par {ellipsis}.\n\
         - Réponds par un seul objet JSON (jamais un tableau) de la forme \
         {{\"content\": \"...\", \"source\": \"...\"}}, sans texte autour.",
        honorific = HONORIFIC,
        content_rule = content_rule,
        max_chars = max_chars,
        ellipsis = ELLIPSIS_MARKER,
    )
}

/// Prompt for fresh generation
pub fn generation_prompt(category: Category, topic: Option<&str>) -> String {
    let template = template_for(category);
    let mut prompt = format!("Donne-moi {}.\n", template.subject);

    if let Some(topic) = topic {
        prompt.push_str(&format!("{} : \"{}\".\n", template.topic_clause, topic));
    }

    prompt.push_str(&format!(
        "Le champ \"source\" indique {}.\n\n{}",
        template.source_format,
        shared_rules(QUOTE_ONLY, template.max_chars)
    ));
    prompt
}

/// Prompt for condensing a hadith found by keyword search
pub fn analysis_prompt(found_text: &str, found_source: &str, user_query: &str) -> String {
    format!(
        "Un utilisateur cherche un hadith sur : \"{query}\".\n\
         Voici le hadith trouvé ({source}) :\n\"\"\"\n{text}\n\"\"\"\n\n\
         Si ce texte fait au plus {max} caractères, reproduis-le mot pour mot. \
         Sinon, condense-le en gardant son sens essentiel et la partie qui répond à la recherche, \
         en marquant chaque coupure par {ellipsis}.\n\
         Le champ \"source\" reprend exactement : \"{source}\".\n\n{rules}",
        query = user_query,
        source = found_source,
        text = found_text,
        max = ANALYSIS_MAX_CHARS,
        ellipsis = ELLIPSIS_MARKER,
        rules = shared_rules(
            &format!(
                "commence toujours par \"{}\" suivi du texte cité, sans autre explication,",
                ANALYSIS_INTRO
            ),
            ANALYSIS_MAX_CHARS + ANALYSIS_INTRO.chars().count() + 1,
        ),
    )
}

/// Prompt for a free-text explanation
pub fn explanation_prompt(text: &str, source: &str) -> String {
    format!(
        "Explique de manière pédagogique et bienveillante le texte suivant ({source}) :\n\
         \"\"\"\n{text}\n\"\"\"\n\n\
         Donne son contexte, son sens et une leçon pratique pour aujourd'hui, en français, \
         en Markdown, en moins de 250 mots. Écris \"Allah\" pour le nom divin et ajoute {honorific} \
         après chaque mention du Prophète.",
        source = source,
        text = text,
        honorific = HONORIFIC,
    )
}
