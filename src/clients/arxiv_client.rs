/// arXiv 客户端
///
/// 封装元数据查询（Atom feed）和 PDF 正文提取
use crate::config::Config;
use crate::error::{ApiError, AppResult};
use crate::models::ArxivEntry;
use quick_xml::events::Event;
use quick_xml::Reader;
use std::time::Duration;
use tracing::debug;

/// arXiv 对无效编号返回的错误条目 id 前缀
const ARXIV_ERROR_ID: &str = "arxiv.org/api/errors";

/// arXiv 客户端
pub struct ArxivClient {
    http: reqwest::Client,
    api_base: String,
    pdf_base: String,
    pdf_max_pages: usize,
    pdf_max_chars: usize,
}

impl ArxivClient {
    /// 创建新的 arXiv 客户端
    pub fn new(config: &Config) -> AppResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.http_timeout_secs))
            .build()?;

        Ok(Self {
            http,
            api_base: config.arxiv_api_base.clone(),
            pdf_base: config.arxiv_pdf_base.trim_end_matches('/').to_string(),
            pdf_max_pages: config.pdf_max_pages,
            pdf_max_chars: config.pdf_max_chars,
        })
    }

    /// 查询元数据，没有匹配条目时返回空条目
    pub async fn fetch_entry(&self, arxiv_id: &str) -> AppResult<ArxivEntry> {
        debug!("查询 arXiv 元数据: {}", arxiv_id);

        let response = self
            .http
            .get(&self.api_base)
            .query(&[("id_list", arxiv_id), ("max_results", "1")])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::BadStatus {
                endpoint: self.api_base.clone(),
                status: status.as_u16(),
            }
            .into());
        }

        let body = response.text().await?;
        let entry = parse_atom_entry(&body).map_err(|e| ApiError::DecodeFailed {
            endpoint: self.api_base.clone(),
            source: Box::new(e),
        })?;

        debug!(
            "arXiv 元数据: 标题 {:?}, 作者 {} 位",
            entry.title,
            entry.authors.len()
        );
        Ok(entry)
    }

    /// 下载 PDF 并提取前几页文本
    ///
    /// # 参数
    /// - `arxiv_id`: arXiv 编号
    ///
    /// # 返回
    /// 返回截断到 `pdf_max_chars` 个字符的正文
    pub async fn extract_pdf_text(&self, arxiv_id: &str) -> AppResult<String> {
        let url = format!("{}/{}.pdf", self.pdf_base, arxiv_id);
        debug!("下载 PDF: {}", url);

        let response = self.http.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::BadStatus {
                endpoint: url,
                status: status.as_u16(),
            }
            .into());
        }

        let bytes = response.bytes().await?;
        debug!("PDF 大小: {} 字节", bytes.len());

        let max_pages = self.pdf_max_pages;
        let id = arxiv_id.to_string();
        let text = tokio::task::spawn_blocking(move || extract_text_from_pdf(&bytes, max_pages))
            .await
            .map_err(|e| ApiError::PdfExtractFailed {
                arxiv_id: id.clone(),
                message: e.to_string(),
            })?
            .map_err(|message| ApiError::PdfExtractFailed {
                arxiv_id: id,
                message,
            })?;

        Ok(text.chars().take(self.pdf_max_chars).collect())
    }
}

/// 用 lopdf 提取前 `max_pages` 页的文本
fn extract_text_from_pdf(bytes: &[u8], max_pages: usize) -> Result<String, String> {
    if max_pages == 0 {
        return Ok(String::new());
    }

    let document =
        lopdf::Document::load_mem(bytes).map_err(|e| format!("无法解析 PDF: {}", e))?;
    let page_numbers: Vec<u32> = document
        .get_pages()
        .keys()
        .copied()
        .take(max_pages)
        .collect();

    if page_numbers.is_empty() {
        return Ok(String::new());
    }

    document
        .extract_text(&page_numbers)
        .map_err(|e| format!("无法提取 PDF 文本: {}", e))
}

/// 当前正在读取的字段
#[derive(Clone, Copy, PartialEq, Eq)]
enum Field {
    None,
    Id,
    Title,
    Summary,
    Published,
    AuthorName,
}

/// 解析 Atom feed 中的第一个 `<entry>`
///
/// 标题和摘要的空白折叠为单个空格，发布日期只保留日期部分，
/// 作者按文档顺序收集。没有条目（或 arXiv 返回错误条目）时返回空条目。
pub fn parse_atom_entry(xml: &str) -> Result<ArxivEntry, quick_xml::Error> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut in_entry = false;
    let mut in_author = false;
    let mut field = Field::None;

    let mut buf = EntryBuf::default();

    loop {
        match reader.read_event()? {
            Event::Eof => break,
            Event::Start(e) => {
                let name = e.local_name();
                match name.as_ref() {
                    b"entry" => in_entry = true,
                    b"author" if in_entry => {
                        in_author = true;
                        buf.author_name.clear();
                    }
                    b"name" if in_author => field = Field::AuthorName,
                    b"id" if in_entry && !in_author => field = Field::Id,
                    b"title" if in_entry => field = Field::Title,
                    b"summary" if in_entry => field = Field::Summary,
                    b"published" if in_entry => field = Field::Published,
                    _ => {}
                }
            }
            Event::End(e) => {
                let name = e.local_name();
                match name.as_ref() {
                    // 只取第一个条目
                    b"entry" if in_entry => break,
                    b"author" if in_author => {
                        in_author = false;
                        let author = collapse_whitespace(&buf.author_name);
                        if !author.is_empty() {
                            buf.authors.push(author);
                        }
                    }
                    _ => {}
                }
                field = Field::None;
            }
            Event::Text(t) => buf.push(field, &t.unescape()?),
            Event::CData(c) => buf.push(field, &String::from_utf8_lossy(&c.into_inner())),
            _ => {}
        }
    }

    if !in_entry || buf.id.contains(ARXIV_ERROR_ID) {
        return Ok(ArxivEntry::default());
    }

    Ok(ArxivEntry {
        title: collapse_whitespace(&buf.title),
        summary: collapse_whitespace(&buf.summary),
        published: buf.published.trim().chars().take(10).collect(),
        authors: buf.authors,
    })
}

/// 解析过程中累积的字段文本
#[derive(Default)]
struct EntryBuf {
    id: String,
    title: String,
    summary: String,
    published: String,
    author_name: String,
    authors: Vec<String>,
}

impl EntryBuf {
    fn push(&mut self, field: Field, text: &str) {
        let target = match field {
            Field::None => return,
            Field::Id => &mut self.id,
            Field::Title => &mut self.title,
            Field::Summary => &mut self.summary,
            Field::Published => &mut self.published,
            Field::AuthorName => &mut self.author_name,
        };
        if !target.is_empty() {
            target.push(' ');
        }
        target.push_str(text);
    }
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
