// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Built-in knowledge base of the Museo de Arte Contemporáneo (MAC) Lima
//!
//! Four zones of the permanent collection and one documented work per zone.

use super::knowledge::{ItemMetadata, KnowledgeItem};

pub fn mac_catalog() -> Vec<KnowledgeItem> {
    vec![
        KnowledgeItem::new(
            "zona-iac",
            "Zona IAC: Alberga obras del Instituto de Arte Contemporáneo (1955-1972), pionero en difundir arte moderno europeo y estadounidense en Perú.",
            ItemMetadata::zone("IAC").with_attribute("periodo", "1955-1972"),
        ),
        KnowledgeItem::new(
            "zona-radicalidad",
            "Zona Radicalidad y resistencia: Exhibe obras que cuestionan valores estéticos tradicionales y visibilizan identidades marginadas.",
            ItemMetadata::zone("Radicalidad y resistencia").with_attribute("tematica", "critica social"),
        ),
        KnowledgeItem::new(
            "zona-postmodernidad",
            "Zona Referente y Postmodernidad: Obras post-1980 que usan serigrafía y apropiación de imágenes de cultura popular (publicidad, periódicos, música chicha).",
            ItemMetadata::zone("Referente y Postmodernidad")
                .with_attribute("tecnicas", "serigrafia, apropiacion"),
        ),
        KnowledgeItem::new(
            "zona-centro",
            "Zona Centro: Espacio central con pintura, fotografía, instalación y videoarte que refleja fracturas sociales peruanas, como el debate sobre arte tradicional vs. académico.",
            ItemMetadata::zone("Centro").with_attribute("formatos", "pintura, fotografia, instalacion"),
        ),
        KnowledgeItem::new(
            "obra-bryce",
            "Obra: El mundo en llamas | Artista: Fernando Bryce | Zona: Referente y Postmodernidad | Técnica: Instalación (95 dibujos en tinta) | Detalles: Crítica a la construcción histórica mediante reproducción de periódicos de la Segunda Guerra Mundial. Usa 'método de análisis mimético' para deconstruir discursos de poder.",
            ItemMetadata::artwork("Referente y Postmodernidad", "Fernando Bryce")
                .with_attribute("año", "2000s")
                .with_attribute("tecnica", "instalacion"),
        ),
        KnowledgeItem::new(
            "obra-flores",
            "Obra: Shao Kené 5 | Artista: Sara Flores | Zona: Radicalidad y resistencia | Técnica: Pintura con pigmentos naturales (huito) | Detalles: Reinterpretación contemporánea de diseños geométricos Shipibo-Konibo ('kené'), simbolizando cosmovisión amazónica y resistencia cultural.",
            ItemMetadata::artwork("Radicalidad y resistencia", "Sara Flores")
                .with_attribute("cultura", "Shipibo-Konibo")
                .with_attribute("material", "pigmentos naturales"),
        ),
        KnowledgeItem::new(
            "obra-lopez-antay",
            "Obra: Retablo Ayacuchano | Artista: Joaquín López Antay | Zona: Centro | Técnica: Escultura en madera con masa de papa | Detalles: Representa sincretismo cultural con escenas religiosas/costumbristas. Premio Nacional de Artes 1975 generó debate sobre arte popular.",
            ItemMetadata::artwork("Centro", "Joaquin Lopez Antay")
                .with_attribute("estilo", "arte popular")
                .with_attribute("premio", "1975"),
        ),
        KnowledgeItem::new(
            "obra-eielson",
            "Obra: Vertical celeste | Artista: Jorge Eduardo Eielson | Zona: IAC | Técnica: Instalación (luz/arena) | Detalles: Inspirado en quipus y astrología andina. Conecta Alfa Centauro con herencia precolombina, explorando arte conceptual y espacial.",
            ItemMetadata::artwork("IAC", "Jorge Eduardo Eielson")
                .with_attribute("inspiracion", "quipus/astrologia")
                .with_attribute("medio", "instalacion luminica"),
        ),
    ]
}
