//! Shared mocks for bot tests.

#![allow(dead_code)]

use async_trait::async_trait;
use saucebot_core::{
    Author, MediaItem, MediaKind, Post, PostId, SourceInfo, SourceInfoBuilder, SourceResult,
};
use saucebot_error::{LookupError, LookupErrorKind, PlatformError, PlatformErrorKind};
use saucebot_interface::{LookupResult, PlatformResult, SauceLookup, SocialPlatform};
use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

/// A reply the mock platform was asked to publish.
#[derive(Debug, Clone, PartialEq)]
pub struct SentReply {
    pub text: String,
    pub in_reply_to: PostId,
    pub auto_populate_metadata: bool,
}

/// In-memory social platform.
#[derive(Debug, Default)]
pub struct MockPlatform {
    mentions: Mutex<Vec<Post>>,
    timelines: Mutex<HashMap<String, Vec<Post>>>,
    posts: Mutex<HashMap<PostId, Post>>,
    replies: Mutex<Vec<SentReply>>,
    reply_failures: Mutex<HashSet<PostId>>,
    failing_accounts: Mutex<HashSet<String>>,
    fail_mentions: AtomicBool,
    fetch_post_calls: AtomicUsize,
}

impl MockPlatform {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_mention(&self, post: Post) {
        self.mentions.lock().unwrap().push(post);
    }

    pub fn add_user_post(&self, account: &str, post: Post) {
        self.timelines
            .lock()
            .unwrap()
            .entry(account.to_string())
            .or_default()
            .push(post);
    }

    /// Make a post retrievable through `fetch_post`.
    pub fn add_post(&self, post: Post) {
        self.posts.lock().unwrap().insert(*post.id(), post);
    }

    pub fn fail_reply_to(&self, id: PostId) {
        self.reply_failures.lock().unwrap().insert(id);
    }

    pub fn fail_account(&self, account: &str) {
        self.failing_accounts
            .lock()
            .unwrap()
            .insert(account.to_string());
    }

    pub fn heal_account(&self, account: &str) {
        self.failing_accounts.lock().unwrap().remove(account);
    }

    pub fn set_mentions_failing(&self, failing: bool) {
        self.fail_mentions.store(failing, Ordering::SeqCst);
    }

    pub fn replies(&self) -> Vec<SentReply> {
        self.replies.lock().unwrap().clone()
    }

    pub fn fetch_post_calls(&self) -> usize {
        self.fetch_post_calls.load(Ordering::SeqCst)
    }

    fn account_failing(&self, account: &str) -> bool {
        self.failing_accounts.lock().unwrap().contains(account)
    }
}

fn newer(posts: &[Post], since: PostId) -> Vec<Post> {
    let mut newer: Vec<Post> = posts.iter().filter(|p| *p.id() > since).cloned().collect();
    newer.sort_by_key(|p| *p.id());
    newer
}

fn unreachable() -> PlatformError {
    PlatformError::new(PlatformErrorKind::Http("connection refused".to_string()))
}

#[async_trait]
impl SocialPlatform for MockPlatform {
    async fn latest_mention_id(&self) -> PlatformResult<Option<PostId>> {
        if self.fail_mentions.load(Ordering::SeqCst) {
            return Err(unreachable());
        }
        Ok(self.mentions.lock().unwrap().iter().map(|p| *p.id()).max())
    }

    async fn latest_user_post_id(&self, account: &str) -> PlatformResult<Option<PostId>> {
        if self.account_failing(account) {
            return Err(unreachable());
        }
        Ok(self
            .timelines
            .lock()
            .unwrap()
            .get(account)
            .and_then(|posts| posts.iter().map(|p| *p.id()).max()))
    }

    async fn fetch_mentions_since(&self, since: PostId) -> PlatformResult<Vec<Post>> {
        if self.fail_mentions.load(Ordering::SeqCst) {
            return Err(unreachable());
        }
        Ok(newer(&self.mentions.lock().unwrap(), since))
    }

    async fn fetch_user_posts_since(&self, account: &str, since: PostId) -> PlatformResult<Vec<Post>> {
        if self.account_failing(account) {
            return Err(unreachable());
        }
        Ok(self
            .timelines
            .lock()
            .unwrap()
            .get(account)
            .map(|posts| newer(posts, since))
            .unwrap_or_default())
    }

    async fn fetch_post(&self, id: PostId) -> PlatformResult<Post> {
        self.fetch_post_calls.fetch_add(1, Ordering::SeqCst);
        self.posts
            .lock()
            .unwrap()
            .get(&id)
            .cloned()
            .ok_or_else(|| PlatformError::new(PlatformErrorKind::NotFound(id.get())))
    }

    async fn post_reply(
        &self,
        text: &str,
        in_reply_to: &Post,
        auto_populate_metadata: bool,
    ) -> PlatformResult<()> {
        if self.reply_failures.lock().unwrap().contains(in_reply_to.id()) {
            return Err(PlatformError::new(PlatformErrorKind::Api {
                status: 500,
                message: "internal error".to_string(),
            }));
        }
        self.replies.lock().unwrap().push(SentReply {
            text: text.to_string(),
            in_reply_to: *in_reply_to.id(),
            auto_populate_metadata,
        });
        Ok(())
    }
}

/// Scripted lookup service. Queued responses are served first, then the
/// fallback.
#[derive(Debug, Default)]
pub struct MockLookup {
    queued: Mutex<VecDeque<LookupResult<Vec<SourceResult>>>>,
    fallback: Mutex<Vec<SourceResult>>,
    calls: AtomicUsize,
    urls: Mutex<Vec<String>>,
}

impl MockLookup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Always answer with `results` once the queue is empty.
    pub fn answering(results: Vec<SourceResult>) -> Self {
        let lookup = Self::default();
        *lookup.fallback.lock().unwrap() = results;
        lookup
    }

    pub fn push_ok(&self, results: Vec<SourceResult>) {
        self.queued.lock().unwrap().push_back(Ok(results));
    }

    pub fn push_err(&self, kind: LookupErrorKind) {
        self.queued
            .lock()
            .unwrap()
            .push_back(Err(LookupError::new(kind)));
    }

    pub fn push_rate_limits(&self, count: usize) {
        for _ in 0..count {
            self.push_err(LookupErrorKind::RateLimited);
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn urls(&self) -> Vec<String> {
        self.urls.lock().unwrap().clone()
    }
}

#[async_trait]
impl SauceLookup for MockLookup {
    async fn lookup(&self, media_url: &str) -> LookupResult<Vec<SourceResult>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.urls.lock().unwrap().push(media_url.to_string());
        let queued = self.queued.lock().unwrap().pop_front();
        match queued {
            Some(response) => response,
            None => Ok(self.fallback.lock().unwrap().clone()),
        }
    }

    fn service_name(&self) -> &'static str {
        "mock"
    }
}

pub fn author(handle: &str) -> Author {
    Author::new(format!("id-{}", handle), handle)
}

pub fn photo(url: &str) -> MediaItem {
    MediaItem::new(url, MediaKind::Photo)
}

/// A post with one photo attached.
pub fn photo_post(id: u64, handle: &str, url: &str) -> Post {
    Post::new(PostId(id), author(handle)).with_extended_media(vec![photo(url)])
}

/// A post without media.
pub fn text_post(id: u64, handle: &str) -> Post {
    Post::new(PostId(id), author(handle)).with_text("no pictures here")
}

/// A reply to `target`.
pub fn reply_post(id: u64, handle: &str, target: u64) -> Post {
    Post::new(PostId(id), author(handle))
        .with_text("@saucebot sauce?")
        .with_reply_target(PostId(target))
}

pub fn info(title: &str, author_name: Option<&str>, similarity: f32) -> SourceInfo {
    let mut builder = SourceInfoBuilder::default();
    builder
        .index_id(5u32)
        .index_name("Pixiv Images")
        .title(title)
        .source_url("https://www.pixiv.net/artworks/12345")
        .similarity(similarity);
    if let Some(name) = author_name {
        builder.author_name(name);
    }
    builder.build().expect("Complete source info")
}

pub fn generic(title: &str) -> SourceResult {
    SourceResult::Generic(info(title, Some("someone"), 90.0))
}

pub fn video(title: &str, episode: Option<&str>, timestamp: Option<&str>) -> SourceResult {
    let mut builder = SourceInfoBuilder::default();
    builder
        .index_id(21u32)
        .index_name("Anime")
        .title(title)
        .source_url("https://anidb.net/anime/23")
        .similarity(92.0f32);
    SourceResult::Video {
        info: builder.build().expect("Complete source info"),
        episode: episode.map(str::to_string),
        timestamp: timestamp.map(str::to_string),
    }
}
