mod common;

use cin_ocr::error::PipelineError;
use cin_ocr::ocr::{
    normalize_arabic, normalize_latin, preprocess, run_pipeline, LanguageSelector, LineBreaks,
    OcrPipeline, TextNormalizer,
};
use image::{DynamicImage, GrayImage, ImageFormat, Luma, Rgba, RgbaImage};
use once_cell::sync::Lazy;
use pretty_assertions::assert_eq;
use regex::Regex;

use common::{card_image, card_png, encode, ScriptedEngine};

/// Noisy strings in the shape Tesseract produces for ID cards.
const NOISY_CORPUS: &[&str] = &[
    "",
    "   ",
    "ID   No:  123456\n\nName:   John##Doe",
    "ROYAUME DU MAROC\r\nCARTE NATIONALE D'IDENTITE\r\n",
    "  Né le  01.02.1990  à   Rabat |  ",
    "a # b | c ~ d",
    "\t\tCIN:\tAB123456\t\t",
    "«Nom» : {El Amrani} [Fatima-Zahra]",
    "المملكة   المغربية\nالبطاقة الوطنية  للتعريف",
    "الاسم: Mohamed محمد ; تاريخ: ١٩٩٠/٠٢/٠١ !!",
    "mixed — dashes – and … ellipsis",
    "%%%%\n####\n",
    "Jose\u{0301} a\u{200D}b x\u{203F}y ½ ²",
];

static LATIN_ALLOWED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[\p{L}\p{N}_\x{0600}-\x{06FF}\s:/.\-]*$").unwrap());

fn latin_allowed(c: char) -> bool {
    LATIN_ALLOWED.is_match(c.encode_utf8(&mut [0; 4]))
}

fn arabic_allowed(c: char) -> bool {
    ('\u{0600}'..='\u{06FF}').contains(&c)
        || c.is_whitespace()
        || matches!(c, ',' | ':' | ';' | '!' | '?' | '.' | '-')
}

fn has_whitespace_run(s: &str) -> bool {
    let chars: Vec<char> = s.chars().collect();
    chars
        .windows(2)
        .any(|w| w[0].is_whitespace() && w[1].is_whitespace())
}

#[test]
fn latin_output_respects_allow_list_and_whitespace() {
    for raw in NOISY_CORPUS {
        let out = normalize_latin(raw, LineBreaks::Collapse);
        assert!(out.chars().all(latin_allowed), "disallowed char in {out:?}");
        assert!(!has_whitespace_run(&out), "whitespace run in {out:?}");
        assert_eq!(out, out.trim(), "untrimmed output {out:?}");
        assert!(!out.contains('\n'), "newline in collapsed output {out:?}");
    }
}

#[test]
fn latin_keeps_numbers_but_not_marks_or_joiners() {
    assert_eq!(
        normalize_latin("Jose\u{0301} a\u{200D}b x\u{203F}y ½ ²", LineBreaks::Collapse),
        "Jose ab xy ½ ²"
    );
}

#[test]
fn latin_preserve_lines_are_clean() {
    for raw in NOISY_CORPUS {
        let out = normalize_latin(raw, LineBreaks::Preserve);
        for line in out.split('\n') {
            assert!(!line.is_empty(), "empty line in {out:?}");
            assert_eq!(line, line.trim());
            assert!(!has_whitespace_run(line), "whitespace run in {line:?}");
            assert!(line.chars().all(latin_allowed));
        }
    }
}

#[test]
fn arabic_output_respects_allow_list_and_whitespace() {
    for raw in NOISY_CORPUS {
        let out = normalize_arabic(raw);
        assert!(out.chars().all(arabic_allowed), "disallowed char in {out:?}");
        assert!(!has_whitespace_run(&out), "whitespace run in {out:?}");
        assert_eq!(out, out.trim());
    }
}

#[test]
fn normalization_is_idempotent() {
    for raw in NOISY_CORPUS {
        let latin = normalize_latin(raw, LineBreaks::Collapse);
        assert_eq!(normalize_latin(&latin, LineBreaks::Collapse), latin);

        let preserved = normalize_latin(raw, LineBreaks::Preserve);
        assert_eq!(normalize_latin(&preserved, LineBreaks::Preserve), preserved);

        let arabic = normalize_arabic(raw);
        assert_eq!(normalize_arabic(&arabic), arabic);
    }
}

#[test]
fn binarisation_yields_two_levels_and_keeps_size() {
    let images = [
        card_image(200, 80),
        DynamicImage::ImageRgba8(RgbaImage::from_fn(64, 64, |x, y| {
            let v = ((x * 4 + y) % 256) as u8;
            Rgba([v, 255 - v, v / 3, 200])
        })),
        DynamicImage::ImageLuma8(GrayImage::from_pixel(16, 16, Luma([77]))),
    ];

    for img in &images {
        let processed = preprocess(img);
        assert_eq!(processed.width(), img.width());
        assert_eq!(processed.height(), img.height());
        assert!(processed
            .as_gray()
            .pixels()
            .all(|p| p[0] == 0 || p[0] == 255));
    }
}

#[test]
fn jpeg_card_runs_through_pipeline() {
    let jpeg = encode(&card_image(160, 64), ImageFormat::Jpeg);
    let text = run_pipeline(
        ScriptedEngine::shared("CIN:   AB123456 ###"),
        &jpeg,
        LanguageSelector::Latin,
    )
    .unwrap();
    assert_eq!(text.as_str(), "CIN: AB123456");
}

#[test]
fn latin_card_scenario() {
    let pipeline = OcrPipeline::new(
        ScriptedEngine::shared("ID   No:  123456\n\nName:   John##Doe"),
        TextNormalizer::default(),
    );
    let text = pipeline.run(&card_png(), LanguageSelector::Latin).unwrap();
    assert_eq!(text.as_str(), "ID No: 123456 Name: JohnDoe");
}

#[test]
fn latin_card_scenario_with_line_breaks() {
    let pipeline = OcrPipeline::new(
        ScriptedEngine::shared("ID   No:  123456\n\nName:   John##Doe"),
        TextNormalizer::new(LineBreaks::Preserve),
    );
    let text = pipeline.run(&card_png(), LanguageSelector::Latin).unwrap();
    assert_eq!(text.as_str(), "ID No: 123456\nName: JohnDoe");
}

#[test]
fn arabic_card_scenario() {
    let text = run_pipeline(
        ScriptedEngine::shared("  الاسم:   محمد   "),
        &card_png(),
        LanguageSelector::Arabic,
    )
    .unwrap();
    assert_eq!(text.as_str(), "الاسم: محمد");
}

#[test]
fn combined_uses_latin_cleanup() {
    let text = run_pipeline(
        ScriptedEngine::shared("Nom: Ali ## الاسم: علي"),
        &card_png(),
        LanguageSelector::Combined,
    )
    .unwrap();
    assert_eq!(text.as_str(), "Nom: Ali الاسم: علي");
}

#[test]
fn unknown_selector_is_rejected() {
    let pipeline = OcrPipeline::new(ScriptedEngine::shared("x"), TextNormalizer::default());
    let err = pipeline.run_tagged(&card_png(), "klingon").unwrap_err();
    assert!(matches!(err, PipelineError::InvalidSelector(_)));
    assert!(err.is_client_error());
}

#[test]
fn non_image_bytes_are_rejected() {
    let err = run_pipeline(
        ScriptedEngine::shared("x"),
        b"not an image",
        LanguageSelector::Latin,
    )
    .unwrap_err();
    assert!(matches!(err, PipelineError::ImageDecode(_)));
}

#[test]
fn unavailable_backend_surfaces_as_backend_error() {
    let err = run_pipeline(
        std::sync::Arc::new(common::UnavailableEngine),
        &card_png(),
        LanguageSelector::Combined,
    )
    .unwrap_err();
    assert!(matches!(err, PipelineError::OcrBackend(_)));
    assert!(!err.is_client_error());
}
