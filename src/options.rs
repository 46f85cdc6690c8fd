//! Conversion options sent with every convert request.
//!
//! [`ConvertOptions`] mirrors the option set accepted by the docling-serve
//! API. Every field is optional from the server's point of view: a field
//! that is unset (or empty, see below) is simply not transmitted and the
//! server applies its own default. Keeping all knobs in one serializable
//! struct makes it trivial to share a configuration across requests and to
//! log exactly what a request asked for.
//!
//! # Omission rules
//!
//! Two distinct rules decide whether a field is transmitted, expressed as
//! `skip_serializing_if` attributes so the same struct drives both the JSON
//! and the multipart encodings:
//!
//! * *skip when empty*: empty collections and strings, `None` options,
//!   `false` booleans and zero scalars are not sent.
//! * *skip when default*: a nested record equal to its `Default` value is
//!   not sent even though the field itself is populated
//!   (see [`GenerationConfig`]).
//!
//! Tri-state server options whose server-side default is `true` (for example
//! `do_ocr`) are `Option<bool>`: `None` means "server default", `Some(false)`
//! means "explicitly off". An unset option is never confused with a zero
//! value.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Options controlling how the server converts submitted documents.
///
/// Build one with [`ConvertOptions::default()`] and chain `with_*` setters:
///
/// ```rust
/// use docling_client::{ConvertOptions, InputFormat, OutputFormat, OcrEngine};
///
/// let options = ConvertOptions::default()
///     .with_from_formats([InputFormat::Pdf])
///     .with_to_formats([OutputFormat::Md])
///     .with_do_ocr(true)
///     .with_ocr_engine(OcrEngine::Easyocr);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConvertOptions {
    /// Input formats to accept. Server default: all formats.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub from_formats: Vec<InputFormat>,

    /// Output formats to produce. Server default: `["md"]`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub to_formats: Vec<OutputFormat>,

    /// How images are represented in the output. Server default: embedded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_export_mode: Option<ImageExportMode>,

    /// Run OCR on bitmap content. Server default: true.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub do_ocr: Option<bool>,

    /// Re-OCR even where a text layer exists. Server default: false.
    #[serde(default, skip_serializing_if = "is_false")]
    pub force_ocr: bool,

    /// OCR engine to use. Server default: easyocr.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ocr_engine: Option<OcrEngine>,

    /// OCR language hints (engine-specific codes). Server default: empty.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ocr_lang: Vec<String>,

    /// PDF parsing backend. Server default: dlparse_v4.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pdf_backend: Option<PdfBackend>,

    /// Table structure recognition mode. Server default: accurate.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table_mode: Option<TableMode>,

    /// Match table cells back to PDF text cells. Server default: true.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table_cell_matching: Option<bool>,

    /// Processing pipeline. Server default: standard.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pipeline: Option<Pipeline>,

    /// 1-indexed inclusive page range, as `[first, last]`.
    /// Server default: the whole document.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub page_range: Vec<u64>,

    /// Per-document processing timeout in seconds. Server default: 604800.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document_timeout: Option<u64>,

    /// Abort the whole batch on the first failed document.
    /// Server default: false.
    #[serde(default, skip_serializing_if = "is_false")]
    pub abort_on_error: bool,

    /// Run table structure recognition. Server default: true.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub do_table_structure: Option<bool>,

    /// Include images in the output. Server default: true.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include_images: Option<bool>,

    /// Scale factor for extracted images. Server default: 2.0.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub images_scale: Option<f64>,

    /// Placeholder inserted at page breaks in Markdown output.
    /// Server default: none.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub md_page_break_placeholder: String,

    /// Enrich code blocks with language detection. Server default: false.
    #[serde(default, skip_serializing_if = "is_false")]
    pub do_code_enrichment: bool,

    /// Enrich formulas with LaTeX extraction. Server default: false.
    #[serde(default, skip_serializing_if = "is_false")]
    pub do_formula_enrichment: bool,

    /// Classify pictures (chart, logo, …). Server default: false.
    #[serde(default, skip_serializing_if = "is_false")]
    pub do_picture_classification: bool,

    /// Generate natural-language picture descriptions. Server default: false.
    #[serde(default, skip_serializing_if = "is_false")]
    pub do_picture_description: bool,

    /// Minimum picture area (fraction of page) considered for description.
    /// Server default: 0.05.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub picture_description_area_threshold: Option<f64>,

    /// Describe pictures with a locally hosted model.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub picture_description_local: Option<PictureDescriptionLocal>,

    /// Describe pictures through a remote vision API.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub picture_description_api: Option<PictureDescriptionApi>,

    /// Named VLM pipeline preset (only with [`Pipeline::Vlm`]).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vlm_pipeline_model: Option<VlmModelPreset>,

    /// Fully specified local VLM pipeline model.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vlm_pipeline_model_local: Option<VlmModelLocal>,

    /// Fully specified remote VLM pipeline model.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vlm_pipeline_model_api: Option<VlmModelApi>,
}

impl ConvertOptions {
    pub fn with_from_formats(mut self, formats: impl IntoIterator<Item = InputFormat>) -> Self {
        self.from_formats.extend(formats);
        self
    }

    pub fn with_to_formats(mut self, formats: impl IntoIterator<Item = OutputFormat>) -> Self {
        self.to_formats.extend(formats);
        self
    }

    pub fn with_image_export_mode(mut self, mode: ImageExportMode) -> Self {
        self.image_export_mode = Some(mode);
        self
    }

    pub fn with_do_ocr(mut self, enable: bool) -> Self {
        self.do_ocr = Some(enable);
        self
    }

    pub fn with_force_ocr(mut self, enable: bool) -> Self {
        self.force_ocr = enable;
        self
    }

    pub fn with_ocr_engine(mut self, engine: OcrEngine) -> Self {
        self.ocr_engine = Some(engine);
        self
    }

    pub fn with_ocr_lang(mut self, langs: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.ocr_lang.extend(langs.into_iter().map(Into::into));
        self
    }

    pub fn with_pdf_backend(mut self, backend: PdfBackend) -> Self {
        self.pdf_backend = Some(backend);
        self
    }

    pub fn with_table_mode(mut self, mode: TableMode) -> Self {
        self.table_mode = Some(mode);
        self
    }

    pub fn with_table_cell_matching(mut self, enable: bool) -> Self {
        self.table_cell_matching = Some(enable);
        self
    }

    pub fn with_pipeline(mut self, pipeline: Pipeline) -> Self {
        self.pipeline = Some(pipeline);
        self
    }

    pub fn with_page_range(mut self, first: u64, last: u64) -> Self {
        self.page_range = vec![first, last];
        self
    }

    pub fn with_document_timeout(mut self, secs: u64) -> Self {
        self.document_timeout = Some(secs);
        self
    }

    pub fn with_abort_on_error(mut self, enable: bool) -> Self {
        self.abort_on_error = enable;
        self
    }

    pub fn with_do_table_structure(mut self, enable: bool) -> Self {
        self.do_table_structure = Some(enable);
        self
    }

    pub fn with_include_images(mut self, enable: bool) -> Self {
        self.include_images = Some(enable);
        self
    }

    pub fn with_images_scale(mut self, scale: f64) -> Self {
        self.images_scale = Some(scale);
        self
    }

    pub fn with_md_page_break_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.md_page_break_placeholder = placeholder.into();
        self
    }

    pub fn with_do_code_enrichment(mut self, enable: bool) -> Self {
        self.do_code_enrichment = enable;
        self
    }

    pub fn with_do_formula_enrichment(mut self, enable: bool) -> Self {
        self.do_formula_enrichment = enable;
        self
    }

    pub fn with_do_picture_classification(mut self, enable: bool) -> Self {
        self.do_picture_classification = enable;
        self
    }

    pub fn with_do_picture_description(mut self, enable: bool) -> Self {
        self.do_picture_description = enable;
        self
    }

    pub fn with_picture_description_area_threshold(mut self, threshold: f64) -> Self {
        self.picture_description_area_threshold = Some(threshold);
        self
    }

    pub fn with_picture_description_local(mut self, local: PictureDescriptionLocal) -> Self {
        self.picture_description_local = Some(local);
        self
    }

    pub fn with_picture_description_api(mut self, api: PictureDescriptionApi) -> Self {
        self.picture_description_api = Some(api);
        self
    }

    pub fn with_vlm_pipeline_model(mut self, preset: VlmModelPreset) -> Self {
        self.vlm_pipeline_model = Some(preset);
        self
    }

    pub fn with_vlm_pipeline_model_local(mut self, model: VlmModelLocal) -> Self {
        self.vlm_pipeline_model_local = Some(model);
        self
    }

    pub fn with_vlm_pipeline_model_api(mut self, model: VlmModelApi) -> Self {
        self.vlm_pipeline_model_api = Some(model);
        self
    }
}

// ── Nested option records ────────────────────────────────────────────────

/// Picture description via a locally hosted Hugging Face model.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PictureDescriptionLocal {
    /// Generation parameters. Skipped when left at the defaults so the
    /// server applies its own (`{"max_new_tokens": 200, "do_sample": false}`).
    #[serde(default, skip_serializing_if = "is_default")]
    pub generation_config: GenerationConfig,

    /// Prompt used for each picture.
    /// Server default: "Describe this image in a few sentences."
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub prompt: String,

    /// Hugging Face repository id of the model. Required.
    pub repo_id: String,
}

/// Text-generation parameters for local picture description.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GenerationConfig {
    #[serde(default)]
    pub do_sample: bool,
    #[serde(default)]
    pub max_new_tokens: u32,
}

/// Picture description through a remote OpenAI-compatible vision API.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PictureDescriptionApi {
    /// Concurrent API calls. Server default: 1.
    #[serde(default, skip_serializing_if = "is_zero_u32")]
    pub concurrency: u32,

    /// Extra headers sent with each API call. Server default: none.
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub headers: HashMap<String, String>,

    /// Extra body parameters merged into each API call. Server default: none.
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub params: HashMap<String, serde_json::Value>,

    /// Prompt used for each picture.
    /// Server default: "Describe this image in a few sentences."
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub prompt: String,

    /// Per-call timeout in seconds. Server default: 20.
    #[serde(default, skip_serializing_if = "is_zero_u64")]
    pub timeout: u64,

    /// API endpoint URL. Required.
    pub url: String,
}

/// Fully specified local model for the VLM pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VlmModelLocal {
    /// Extra generation parameters passed through to the model.
    /// Server default: `{"max_new_tokens": 800, "do_sample": false}`.
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub extra_generation_config: HashMap<String, serde_json::Value>,

    /// Inference framework running the model. Required.
    pub inference_framework: InferenceFramework,

    /// Prompt for each page. Server default: "Convert this page to docling."
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub prompt: String,

    /// Hugging Face repository id of the model. Required.
    pub repo_id: String,

    /// Output format the model produces. Required.
    pub response_format: ResponseFormat,

    /// Page image scale. Server default: 2.0.
    #[serde(default, skip_serializing_if = "is_zero_f64")]
    pub scale: f64,

    /// Transformers model class. Server default: automodel.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transformers_model_type: Option<TransformersModelType>,
}

/// Fully specified remote model for the VLM pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VlmModelApi {
    /// Concurrent API calls. Server default: 1.
    #[serde(default, skip_serializing_if = "is_zero_u32")]
    pub concurrency: u32,

    /// Extra headers sent with each API call. Server default: none.
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub headers: HashMap<String, String>,

    /// Extra body parameters merged into each API call. Server default: none.
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub params: HashMap<String, serde_json::Value>,

    /// Prompt for each page. Server default: "Convert this page to docling."
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub prompt: String,

    /// Output format the model produces. Required.
    pub response_format: ResponseFormat,

    /// Page image scale. Server default: 2.0.
    #[serde(default, skip_serializing_if = "is_zero_f64")]
    pub scale: f64,

    /// Per-call timeout in seconds. Server default: 60.
    #[serde(default, skip_serializing_if = "is_zero_u64")]
    pub timeout: u64,

    /// API endpoint URL. Required.
    pub url: String,
}

// ── Enumerations ─────────────────────────────────────────────────────────

/// Document formats the server accepts as input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputFormat {
    Docx,
    Pptx,
    Html,
    Image,
    Pdf,
    Asciidoc,
    Md,
    Csv,
    Xlsx,
    XmlUspto,
    XmlJats,
    MetsGbs,
    JsonDocling,
    Audio,
}

/// Document formats the server can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    Md,
    Json,
    Html,
    HtmlSplitPage,
    Text,
    Doctags,
}

/// How images appear in converted output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageExportMode {
    Placeholder,
    Embedded,
    Referenced,
}

/// OCR engines available on the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OcrEngine {
    Easyocr,
    Ocrmac,
    Rapidocr,
    Tesserocr,
    Tesseract,
}

/// PDF parsing backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PdfBackend {
    Pypdfium2,
    DlparseV1,
    DlparseV2,
    DlparseV4,
}

/// Table structure recognition modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TableMode {
    Fast,
    Accurate,
}

/// Server-side processing pipelines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Pipeline {
    Standard,
    Vlm,
    Asr,
}

/// Named VLM pipeline presets known to the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VlmModelPreset {
    Smoldocling,
    SmoldoclingVllm,
    GraniteVision,
    GraniteVisionVllm,
    GraniteVisionOllama,
    #[serde(rename = "got_ocr_2")]
    GotOcr2,
}

/// Output formats a VLM pipeline model can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseFormat {
    Doctags,
    Markdown,
    Html,
    Otsl,
    Plaintext,
}

/// Inference frameworks for locally hosted VLM models.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InferenceFramework {
    Mlx,
    Transformers,
    Vllm,
}

/// Transformers model classes for local VLM models.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransformersModelType {
    #[serde(rename = "automodel")]
    AutoModel,
    #[serde(rename = "automodel-vision2seq")]
    AutoModelVision2Seq,
    #[serde(rename = "automodel-causallm")]
    AutoModelCausalLm,
    #[serde(rename = "automodel-imagetexttotext")]
    AutoModelImageTextToText,
}

// ── skip_serializing_if helpers ──────────────────────────────────────────

fn is_false(v: &bool) -> bool {
    !*v
}

fn is_zero_u32(v: &u32) -> bool {
    *v == 0
}

fn is_zero_u64(v: &u64) -> bool {
    *v == 0
}

fn is_zero_f64(v: &f64) -> bool {
    *v == 0.0
}

/// Whole-value comparison against the type's default, used for nested
/// records that should vanish when left untouched.
fn is_default<T: Default + PartialEq>(v: &T) -> bool {
    *v == T::default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_options_serialize_to_empty_object() {
        let json = serde_json::to_value(ConvertOptions::default()).unwrap();
        assert_eq!(json, serde_json::json!({}));
    }

    #[test]
    fn set_fields_appear_under_wire_names() {
        let options = ConvertOptions::default()
            .with_from_formats([InputFormat::Pdf, InputFormat::Docx])
            .with_to_formats([OutputFormat::Md])
            .with_do_ocr(false)
            .with_ocr_engine(OcrEngine::Tesseract)
            .with_images_scale(1.5);

        let json = serde_json::to_value(&options).unwrap();
        assert_eq!(json["from_formats"], serde_json::json!(["pdf", "docx"]));
        assert_eq!(json["to_formats"], serde_json::json!(["md"]));
        assert_eq!(json["do_ocr"], serde_json::json!(false));
        assert_eq!(json["ocr_engine"], serde_json::json!("tesseract"));
        assert_eq!(json["images_scale"], serde_json::json!(1.5));
    }

    #[test]
    fn false_booleans_are_not_transmitted() {
        let options = ConvertOptions::default().with_force_ocr(false);
        let json = serde_json::to_value(&options).unwrap();
        assert!(json.get("force_ocr").is_none());

        let options = ConvertOptions::default().with_force_ocr(true);
        let json = serde_json::to_value(&options).unwrap();
        assert_eq!(json["force_ocr"], serde_json::json!(true));
    }

    #[test]
    fn explicit_false_option_differs_from_unset() {
        // do_ocr defaults to true server-side; Some(false) must go out on
        // the wire while None must not.
        let unset = serde_json::to_value(ConvertOptions::default()).unwrap();
        assert!(unset.get("do_ocr").is_none());

        let off = serde_json::to_value(ConvertOptions::default().with_do_ocr(false)).unwrap();
        assert_eq!(off["do_ocr"], serde_json::json!(false));
    }

    #[test]
    fn default_generation_config_is_skipped_inside_local_description() {
        let local = PictureDescriptionLocal {
            repo_id: "org/model".into(),
            ..Default::default()
        };
        let json = serde_json::to_value(&local).unwrap();
        assert!(json.get("generation_config").is_none());
        assert_eq!(json["repo_id"], serde_json::json!("org/model"));

        let local = PictureDescriptionLocal {
            generation_config: GenerationConfig {
                do_sample: false,
                max_new_tokens: 100,
            },
            repo_id: "org/model".into(),
            ..Default::default()
        };
        let json = serde_json::to_value(&local).unwrap();
        assert_eq!(
            json["generation_config"],
            serde_json::json!({"do_sample": false, "max_new_tokens": 100})
        );
    }

    #[test]
    fn enum_wire_names_match_the_service() {
        assert_eq!(
            serde_json::to_string(&InputFormat::XmlUspto).unwrap(),
            "\"xml_uspto\""
        );
        assert_eq!(
            serde_json::to_string(&OutputFormat::HtmlSplitPage).unwrap(),
            "\"html_split_page\""
        );
        assert_eq!(
            serde_json::to_string(&PdfBackend::DlparseV4).unwrap(),
            "\"dlparse_v4\""
        );
        assert_eq!(
            serde_json::to_string(&VlmModelPreset::GotOcr2).unwrap(),
            "\"got_ocr_2\""
        );
        assert_eq!(
            serde_json::to_string(&TransformersModelType::AutoModelVision2Seq).unwrap(),
            "\"automodel-vision2seq\""
        );
    }

    #[test]
    fn page_range_round_trips() {
        let options = ConvertOptions::default().with_page_range(2, 9);
        let json = serde_json::to_value(&options).unwrap();
        assert_eq!(json["page_range"], serde_json::json!([2, 9]));
    }
}
