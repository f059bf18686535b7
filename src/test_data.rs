#[cfg(test)]
pub const FULL_POST: &str = "---
title: Ten SEO tips: the 2025 edition
slug: ten-seo-tips
date: 2025-03-01
scheduled_date: 2025-03-05
meta_description: Everything about SEO
meta_image: https://cdn.example.com/seo.png
meta_image_alt: A search bar
author: Jane Doe
category: SEO
tags: seo, marketing
---

# A heading that is not the title

Search engines reward patience.

Last line.
";

#[cfg(test)]
pub const HTML_POST: &str = "<h1>Title Here</h1>
<p>First paragraph</p>
";
