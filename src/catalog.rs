// Style catalog: static configuration data, validated at startup
//
// Each style carries one prompt template and one reference image per
// gender. Templates must contain the subject-photo and style-reference
// placeholders exactly once; a violation is a data bug caught by
// `validate()`, not a runtime condition.
use std::collections::HashSet;

use crate::error::KioskError;
use crate::models::Gender;

pub const PHOTO_URL_PLACEHOLDER: &str = "{photoUrl}";
pub const STYLE_REF_PLACEHOLDER: &str = "{styleRef}";

#[derive(Debug)]
pub struct StyleDefinition {
    pub id: &'static str,
    pub name: &'static str,
    pub masculine_prompt: &'static str,
    pub feminine_prompt: &'static str,
    pub masculine_reference: &'static str,
    pub feminine_reference: &'static str,
}

impl StyleDefinition {
    pub fn prompt_template(&self, gender: Gender) -> &'static str {
        match gender {
            Gender::Masculine => self.masculine_prompt,
            Gender::Feminine => self.feminine_prompt,
        }
    }

    pub fn reference_url(&self, gender: Gender) -> &'static str {
        match gender {
            Gender::Masculine => self.masculine_reference,
            Gender::Feminine => self.feminine_reference,
        }
    }
}

macro_rules! prompt {
    ($body:expr) => {
        concat!($body, " ", "--cref {photoUrl} --sref {styleRef} --ar 9:16 --iw 2")
    };
}

pub const STYLE_CATALOG: &[StyleDefinition] = &[
    StyleDefinition {
        id: "CLAY_OFFICE",
        name: "Clay Office",
        masculine_prompt: prompt!("as an insurance broker in his work setup, office setting, closing a deal on the phone, claymation style, visible facial expression"),
        feminine_prompt: prompt!("as an insurance broker in her work setup, office setting, closing a deal on the phone, claymation style, visible facial expression"),
        masculine_reference: "https://foto-ai-picbrand-ns.s3.sa-east-1.amazonaws.com/referenciaClayOfficeHomem.png",
        feminine_reference: "https://foto-ai-picbrand-ns.s3.sa-east-1.amazonaws.com/referenciaClayOfficeMulher.png",
    },
    StyleDefinition {
        id: "CORRETOR_FUTURO",
        name: "Corretor do Futuro",
        masculine_prompt: prompt!("as an insurance broker, showing popular items on the table that surrounds the insurance market, like a house, car, health, education, family and travel as little toys in a futuristic high-tech office setting, showing what the company provides"),
        feminine_prompt: prompt!("as an insurance broker, showing popular items on the table that surrounds the insurance market, like a house, car, health, education, family and travel as little toys in a futuristic high-tech office setting, showing what the company provides"),
        masculine_reference: "https://foto-ai-picbrand-ns.s3.sa-east-1.amazonaws.com/referenciaCorretorFuturoHomem.png",
        feminine_reference: "https://foto-ai-picbrand-ns.s3.sa-east-1.amazonaws.com/referenciaCorretorFuturoMulher.png",
    },
    StyleDefinition {
        id: "HOLOGRAMAS_SEGUROS",
        name: "Hologramas de Seguros",
        masculine_prompt: prompt!("as an insurance worker, standing on an insurance office where half the room is solid and half hologram, with products representing insurance products in holograms, money, cars, houses, family, health and travel"),
        feminine_prompt: prompt!("as an insurance worker, standing on an insurance office where half the room is solid and half hologram, with products representing insurance products in holograms, money, cars, houses, family, health and travel"),
        masculine_reference: "https://foto-ai-picbrand-ns.s3.sa-east-1.amazonaws.com/referenciaHologramasSegurosHomem.png",
        feminine_reference: "https://foto-ai-picbrand-ns.s3.sa-east-1.amazonaws.com/referenciaHologramasSegurosMulher.png",
    },
    StyleDefinition {
        id: "LIVRARIA_SEGUROS",
        name: "Livraria dos Seguros",
        masculine_prompt: prompt!("as a sophisticated and knowledgeable insurance provider inside a grand modern library of insurance knowledge, surrounded by floating books, holographic charts about risk and finance, elegant atmosphere, professional yet visionary, clear face"),
        feminine_prompt: prompt!("as a sophisticated and knowledgeable insurance provider inside a grand modern library of insurance knowledge, surrounded by floating books, holographic charts about risk and finance, elegant atmosphere, professional yet visionary, clear face"),
        masculine_reference: "https://foto-ai-picbrand-ns.s3.sa-east-1.amazonaws.com/referenciaLivrariaSegurosHomem.png",
        feminine_reference: "https://foto-ai-picbrand-ns.s3.sa-east-1.amazonaws.com/referenciaLivrariaSegurosMulher.png",
    },
    StyleDefinition {
        id: "PALESTRANDO",
        name: "Palestrando",
        masculine_prompt: prompt!("As an insurance host, on a stage lit insurance language, giving a keynote on the future of learning in insurance"),
        feminine_prompt: prompt!("As an insurance host, on a stage lit insurance language, giving a keynote on the future of learning in insurance"),
        masculine_reference: "https://foto-ai-picbrand-ns.s3.sa-east-1.amazonaws.com/referenciaPalestrandoHomem.png",
        feminine_reference: "https://foto-ai-picbrand-ns.s3.sa-east-1.amazonaws.com/referenciaPalestrandoMulher.png",
    },
    StyleDefinition {
        id: "PODERES",
        name: "Poderes",
        masculine_prompt: prompt!("portrait of an insurance broker holding a ball with symbols of a hospital, family, plane, money, house and car all in his palm like it is his superpowers"),
        feminine_prompt: prompt!("portrait of an insurance broker holding a ball with symbols of a hospital, family, plane, money, house and car all in her palm like it is her superpowers"),
        masculine_reference: "https://foto-ai-picbrand-ns.s3.sa-east-1.amazonaws.com/referenciaPoderesHomem.png",
        feminine_reference: "https://foto-ai-picbrand-ns.s3.sa-east-1.amazonaws.com/referenciaPoderesMulher.png",
    },
    StyleDefinition {
        id: "SALA_FUTURO",
        name: "Sala do Futuro",
        masculine_prompt: prompt!("an insurance instructor lecturing amid holographic insurance modules, neon-blue lecture hall with students and floating insurance priorities, insurance lists, insurance symbols, insurance panels"),
        feminine_prompt: prompt!("an insurance instructor lecturing amid holographic insurance modules, neon-blue lecture hall with students and floating insurance priorities, insurance lists, insurance symbols, insurance panels"),
        masculine_reference: "https://foto-ai-picbrand-ns.s3.sa-east-1.amazonaws.com/referenciaSalaFuturoHomem.png",
        feminine_reference: "https://foto-ai-picbrand-ns.s3.sa-east-1.amazonaws.com/referenciaSalaFuturoMulher.png",
    },
    StyleDefinition {
        id: "SALA_PIXAR",
        name: "Sala Pixar",
        masculine_prompt: prompt!("as an insurance teacher in Pixar animation style, lecturing amid holographic insurance modules, neon-blue lecture hall with floating data panels, full classroom"),
        feminine_prompt: prompt!("as an insurance teacher in Pixar animation style, lecturing amid holographic insurance modules, neon-blue lecture hall with floating data panels, full classroom"),
        masculine_reference: "https://foto-ai-picbrand-ns.s3.sa-east-1.amazonaws.com/referenciaSalaPixarHomem.png",
        feminine_reference: "https://foto-ai-picbrand-ns.s3.sa-east-1.amazonaws.com/referenciaSalaPixarMulher.png",
    },
    StyleDefinition {
        id: "SEGUROS_ONLINE",
        name: "Seguros Online",
        masculine_prompt: prompt!("A laptop screen showing an insurance broker, normal casual business attire, selling health, family and house insurance, in the zoom meeting, office background"),
        feminine_prompt: prompt!("A laptop screen showing an insurance broker, normal casual business attire, selling health, family and house insurance, in the zoom meeting, office background"),
        masculine_reference: "https://foto-ai-picbrand-ns.s3.sa-east-1.amazonaws.com/referenciaSegurosOnlineHomem.png",
        feminine_reference: "https://foto-ai-picbrand-ns.s3.sa-east-1.amazonaws.com/referenciaSegurosOnlineMulher.png",
    },
];

pub fn find_style(style_id: &str) -> Option<&'static StyleDefinition> {
    STYLE_CATALOG.iter().find(|style| style.id == style_id)
}

/// Checks every template carries each placeholder exactly once and that
/// style ids are unique. Run from the test suite and at startup.
pub fn validate() -> Result<(), KioskError> {
    let mut seen = HashSet::new();
    for style in STYLE_CATALOG {
        if !seen.insert(style.id) {
            return Err(KioskError::store(format!("duplicate style id '{}'", style.id)));
        }
        for (gender, template) in [
            (Gender::Masculine, style.masculine_prompt),
            (Gender::Feminine, style.feminine_prompt),
        ] {
            validate_template(style.id, gender, template)?;
        }
    }
    Ok(())
}

fn validate_template(id: &str, gender: Gender, template: &str) -> Result<(), KioskError> {
    for placeholder in [PHOTO_URL_PLACEHOLDER, STYLE_REF_PLACEHOLDER] {
        let count = template.matches(placeholder).count();
        if count != 1 {
            return Err(KioskError::store(format!(
                "style '{}' ({}) has {} occurrences of {}, expected 1",
                id, gender, count, placeholder
            )));
        }
    }
    Ok(())
}
