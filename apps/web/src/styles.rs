use web_sys::Document;

use crate::error::{PortfolioError, Result};

/// Ripple animation and modal body styles the page stylesheet leaves out.
const STYLESHEET: &str = r"
.ripple {
    position: absolute;
    border-radius: 50%;
    background: rgba(255, 255, 255, 0.3);
    transform: scale(0);
    animation: ripple-animation 0.6s ease-out;
    pointer-events: none;
}

@keyframes ripple-animation {
    to {
        transform: scale(2);
        opacity: 0;
    }
}

.modal-header { margin-bottom: 24px; }

.modal-tech-tags {
    display: flex;
    flex-wrap: wrap;
    gap: 8px;
}

.modal-body h2 {
    font-size: 32px;
    margin-bottom: 16px;
    background: linear-gradient(135deg, var(--primary-orange), #D95F3F);
    -webkit-background-clip: text;
    -webkit-text-fill-color: transparent;
    background-clip: text;
}

.modal-body h3 {
    font-size: 24px;
    margin-top: 32px;
    margin-bottom: 16px;
    color: var(--primary-orange);
}

.modal-body h4 {
    font-size: 18px;
    margin-top: 16px;
    margin-bottom: 8px;
    color: var(--primary-orange);
}

.modal-body p, .modal-body li {
    color: var(--text-secondary);
    line-height: 1.8;
    margin-bottom: 12px;
}

.modal-body ul, .modal-body ol {
    padding-left: 24px;
    margin-bottom: 16px;
}

.modal-body ul li::marker { color: var(--primary-orange); }

.modal-feature {
    background: rgba(232, 116, 81, 0.05);
    border-left: 3px solid var(--primary-orange);
    padding: 16px;
    margin: 16px 0;
    border-radius: 8px;
}

.modal-feature h4 { margin-top: 0; }

.pricing-box {
    background: var(--dark-bg);
    border: 2px solid var(--primary-orange);
    border-radius: 12px;
    padding: 24px;
    margin: 24px 0;
}

.pricing-box h4 {
    font-size: 36px;
    color: var(--primary-orange);
    margin: 0 0 16px 0;
}

.pricing-box ul { list-style: none; padding: 0; }

.pricing-box li { padding: 8px 0; color: var(--text-primary); }

blockquote {
    border-left: 4px solid var(--primary-orange);
    padding: 16px 24px;
    margin: 24px 0;
    background: rgba(232, 116, 81, 0.05);
    font-style: italic;
    color: var(--text-secondary);
}
";

pub fn inject(document: &Document) -> Result<()> {
    let head = document
        .head()
        .ok_or(PortfolioError::MissingElement("head"))?;
    let style = document.create_element("style")?;
    style.set_text_content(Some(STYLESHEET));
    head.append_child(&style)?;
    Ok(())
}
