use crate::{
    config::Config,
    error::{Error, Result},
};
use std::{
    collections::HashSet,
    ops::Range,
    path::{Path, PathBuf},
};
use wgpu_glyph::{
    ab_glyph::{Font as _, FontArc, FontVec, ScaleFont as _},
    FontId,
};

pub const HACK: &str = "Hack";
pub const NOTO: &str = "Noto";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Weight(pub u16);

impl Weight {
    pub const NORMAL: Weight = Weight(400);
    pub const BOLD: Weight = Weight(700);
}

impl Default for Weight {
    fn default() -> Self {
        Weight::NORMAL
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Style {
    Regular,
    Italic,
}

impl Default for Style {
    fn default() -> Self {
        Style::Regular
    }
}

impl From<fontdb::Style> for Style {
    fn from(style: fontdb::Style) -> Self {
        match style {
            fontdb::Style::Normal => Style::Regular,
            fontdb::Style::Italic | fontdb::Style::Oblique => Style::Italic,
        }
    }
}

/// What a piece of text asks for. A `None` typeface selects the default
/// typeface of the collection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Font {
    pub typeface: Option<String>,
    pub style: Style,
    pub weight: Weight,
}

impl Font {
    pub fn typeface(name: &str) -> Self {
        Font {
            typeface: Some(name.to_owned()),
            ..Font::default()
        }
    }

    pub fn bold() -> Self {
        Font {
            weight: Weight::BOLD,
            ..Font::default()
        }
    }

    fn typeface_name(&self) -> &str {
        self.typeface.as_deref().unwrap_or("default")
    }
}

#[derive(Clone)]
pub struct FontFace {
    pub font: Font,
    pub face: FontArc,
}

/// A run of text drawn with a single face.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Run {
    pub range: Range<usize>,
    pub font: FontId,
}

/// Registered faces in glyph brush order: face `i` is `FontId(i)`.
#[derive(Clone, Default)]
pub struct FontCollection {
    faces: Vec<FontFace>,
}

impl FontCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.faces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    pub fn face(&self, id: FontId) -> Option<&FontFace> {
        self.faces.get(id.0)
    }

    /// Faces to hand to the glyph brush, in id order.
    pub fn glyph_fonts(&self) -> Vec<FontArc> {
        self.faces.iter().map(|face| face.face.clone()).collect()
    }

    pub fn push(&mut self, font: Font, face: FontArc) -> FontId {
        self.faces.push(FontFace { font, face });
        FontId(self.faces.len() - 1)
    }

    pub fn append_ttf(&mut self, font: Font, ttf: &'static [u8]) -> Result<FontId> {
        let face = FontArc::try_from_slice(ttf).map_err(|source| Error::FontParse {
            typeface: font.typeface_name().to_owned(),
            source,
        })?;
        Ok(self.push(font, face))
    }

    /// Registers every face of a TTC/OTC collection (or the single face of a
    /// plain font file) under `font`.
    pub fn append_otc(&mut self, font: Font, otc: &[u8]) -> Result<usize> {
        let mut db = fontdb::Database::new();
        db.load_font_data(otc.to_vec());

        let mut indices: Vec<u32> = db.faces().map(|info| info.index).collect();
        indices.sort_unstable();
        indices.dedup();
        if indices.is_empty() {
            // fontdb skips data it cannot read; ask ab_glyph for the reason.
            indices.push(0);
        }

        let mut count = 0;
        for index in indices {
            let face = FontVec::try_from_vec_and_index(otc.to_vec(), index).map_err(|source| {
                Error::FontParse {
                    typeface: font.typeface_name().to_owned(),
                    source,
                }
            })?;
            self.push(font.clone(), FontArc::new(face));
            count += 1;
        }
        Ok(count)
    }

    /// Registers the regular, bold and italic faces of the first installed
    /// family in `families` as the default typeface.
    pub fn load_system_default(&mut self, db: &fontdb::Database, families: &[String]) -> usize {
        let families: Vec<fontdb::Family<'_>> = families.iter().map(|f| family(f)).collect();
        let wanted = [
            (fontdb::Weight::NORMAL, fontdb::Style::Normal),
            (fontdb::Weight::BOLD, fontdb::Style::Normal),
            (fontdb::Weight::NORMAL, fontdb::Style::Italic),
        ];

        let mut seen = HashSet::new();
        let mut count = 0;
        for &(weight, style) in wanted.iter() {
            let id = match db.query(&fontdb::Query {
                families: &families,
                weight,
                stretch: fontdb::Stretch::Normal,
                style,
            }) {
                Some(id) => id,
                None => continue,
            };
            if !seen.insert(id) {
                continue;
            }
            if self.load_system_face(db, id, None) {
                count += 1;
            }
        }
        count
    }

    /// Registers every face of the font file holding the regular face of
    /// `family` under `typeface`. Files listed in `loaded` are skipped, so a
    /// collection shared by several families is registered once.
    pub fn load_system_collection(
        &mut self,
        db: &fontdb::Database,
        typeface: &str,
        family: &str,
        loaded: &mut HashSet<PathBuf>,
    ) -> usize {
        let id = match db.query(&fontdb::Query {
            families: &[fontdb::Family::Name(family)],
            ..fontdb::Query::default()
        }) {
            Some(id) => id,
            None => return 0,
        };
        if let Some(path) = db.face(id).and_then(|info| source_path(&info.source)) {
            if !loaded.insert(path.to_owned()) {
                log::debug!("{} shares an already registered file", family);
                return 0;
            }
        }

        let data = match db.with_face_data(id, |data, _| data.to_vec()) {
            Some(data) => data,
            None => return 0,
        };
        match self.append_otc(Font::typeface(typeface), &data) {
            Ok(count) => {
                log::debug!("registered {} faces of {} as {}", count, family, typeface);
                count
            }
            Err(err) => {
                log::warn!("skipping system family {}: {}", family, err);
                0
            }
        }
    }

    fn load_system_face(
        &mut self,
        db: &fontdb::Database,
        id: fontdb::ID,
        typeface: Option<&str>,
    ) -> bool {
        let info = match db.face(id) {
            Some(info) => info,
            None => return false,
        };
        let name = info
            .families
            .first()
            .map(|(name, _)| name.clone())
            .unwrap_or_else(|| info.post_script_name.clone());

        let parsed = db.with_face_data(id, |data, index| {
            FontVec::try_from_vec_and_index(data.to_vec(), index)
        });
        match parsed {
            Some(Ok(face)) => {
                let font = Font {
                    typeface: typeface.map(str::to_owned),
                    style: info.style.into(),
                    weight: Weight(info.weight.0),
                };
                log::debug!("registered system face {} as {:?}", name, font);
                self.push(font, FontArc::new(face));
                true
            }
            Some(Err(err)) => {
                log::warn!("skipping system face {}: {}", name, err);
                false
            }
            None => false,
        }
    }

    /// Picks the face that best matches `want`.
    pub fn resolve(&self, want: &Font) -> Option<FontId> {
        let by_typeface: Vec<usize> = self
            .indices()
            .filter(|&i| self.faces[i].font.typeface == want.typeface)
            .collect();
        let candidates = if !by_typeface.is_empty() {
            by_typeface
        } else {
            let defaults: Vec<usize> = self
                .indices()
                .filter(|&i| self.faces[i].font.typeface.is_none())
                .collect();
            if defaults.is_empty() {
                self.indices().collect()
            } else {
                defaults
            }
        };

        candidates
            .into_iter()
            .min_by_key(|&i| {
                let font = &self.faces[i].font;
                let weight_distance = (i32::from(font.weight.0) - i32::from(want.weight.0)).abs();
                (font.style != want.style, weight_distance, i)
            })
            .map(FontId)
    }

    /// Faces to try for a character, best match first. Every face appears
    /// exactly once.
    pub fn fallback_chain(&self, want: &Font) -> Vec<FontId> {
        let primary = match self.resolve(want) {
            Some(id) => id,
            None => return Vec::new(),
        };
        let typeface = &self.faces[primary.0].font.typeface;

        let mut chain = vec![primary];
        let same_typeface = self
            .indices()
            .filter(|&i| &self.faces[i].font.typeface == typeface);
        let defaults = self.indices().filter(|&i| self.faces[i].font.typeface.is_none());
        for i in same_typeface.chain(defaults).chain(self.indices()) {
            if !chain.contains(&FontId(i)) {
                chain.push(FontId(i));
            }
        }
        chain
    }

    pub fn covers(&self, id: FontId, c: char) -> bool {
        self.faces
            .get(id.0)
            .map_or(false, |face| face.face.glyph_id(c).0 != 0)
    }

    /// Splits `text` into runs, each drawn by the first face in the fallback
    /// chain that has a glyph for it.
    pub fn segment(&self, text: &str, want: &Font) -> Vec<Run> {
        let chain = self.fallback_chain(want);
        let primary = chain.first().copied().unwrap_or(FontId(0));

        let mut runs: Vec<Run> = Vec::new();
        for (start, c) in text.char_indices() {
            let end = start + c.len_utf8();
            let current = runs.last().map(|run| run.font);
            let font = match current {
                Some(current) if inherits_font(c) => current,
                _ => chain
                    .iter()
                    .copied()
                    .find(|&id| self.covers(id, c))
                    .unwrap_or(primary),
            };

            match runs.last_mut() {
                Some(run) if run.font == font => run.range.end = end,
                _ => runs.push(Run {
                    range: start..end,
                    font,
                }),
            }
        }
        runs
    }

    /// Distance between baselines for `id` at `scale` pixels.
    pub fn line_height(&self, id: FontId, scale: f32) -> f32 {
        match self.face(id) {
            Some(face) => {
                let scaled = face.face.as_scaled(scale);
                scaled.height() + scaled.line_gap()
            }
            None => scale,
        }
    }

    fn indices(&self) -> Range<usize> {
        0..self.faces.len()
    }
}

fn family(name: &str) -> fontdb::Family<'_> {
    match name {
        "sans-serif" => fontdb::Family::SansSerif,
        "serif" => fontdb::Family::Serif,
        "monospace" => fontdb::Family::Monospace,
        "cursive" => fontdb::Family::Cursive,
        "fantasy" => fontdb::Family::Fantasy,
        name => fontdb::Family::Name(name),
    }
}

fn source_path(source: &fontdb::Source) -> Option<&Path> {
    match source {
        fontdb::Source::File(path) | fontdb::Source::SharedFile(path, _) => Some(path.as_path()),
        fontdb::Source::Binary(_) => None,
    }
}

/// Characters that carry no glyph of their own and stay with the run they
/// follow.
fn inherits_font(c: char) -> bool {
    c.is_whitespace()
        || matches!(c, '\u{200C}' | '\u{200D}' | '\u{FE00}'..='\u{FE0F}')
}

/// Builds the collection shown by the demo.
pub fn load(config: &Config) -> Result<FontCollection> {
    let mut db = fontdb::Database::new();
    db.load_system_fonts();
    log::info!("found {} system font faces", db.len());

    let mut collection = FontCollection::new();
    let count = collection.load_system_default(&db, &config.system_families);
    log::info!("registered {} system faces as the default typeface", count);
    if collection.is_empty() {
        log::warn!("no usable system font found, falling back to embedded Ubuntu Light");
        collection.append_ttf(Font::default(), epaint_default_fonts::UBUNTU_LIGHT)?;
    }

    collection.append_ttf(Font::typeface(HACK), epaint_default_fonts::HACK_REGULAR)?;

    let mut loaded = HashSet::new();
    let noto: usize = config
        .noto_families
        .iter()
        .map(|family| collection.load_system_collection(&db, NOTO, family, &mut loaded))
        .sum();
    log::info!("registered {} system faces under {}", noto, NOTO);
    collection.append_ttf(Font::typeface(NOTO), epaint_default_fonts::NOTO_EMOJI_REGULAR)?;

    log::info!("font collection holds {} faces", collection.len());
    Ok(collection)
}
