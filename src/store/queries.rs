// region:    --- Users
/// 사용자 생성
pub const INSERT_USER: &str = r#"
    INSERT INTO users (username, email, password_hash, created_at)
    VALUES ($1, $2, $3, $4)
    RETURNING id, username, email, password_hash, created_at
"#;

/// 사용자명으로 조회
pub const GET_USER_BY_USERNAME: &str =
    "SELECT id, username, email, password_hash, created_at FROM users WHERE username = $1";
// endregion: --- Users

// region:    --- Sessions
/// 세션 생성
pub const INSERT_SESSION: &str =
    "INSERT INTO sessions (token, user_id, created_at, expires_at) VALUES ($1, $2, $3, $4)";

/// 세션 사용자 조회 (만료 제외)
pub const GET_SESSION_USER: &str = r#"
    SELECT u.id, u.username, u.email, u.password_hash, u.created_at
    FROM sessions s
    JOIN users u ON u.id = s.user_id
    WHERE s.token = $1 AND s.expires_at > $2
"#;

/// 세션 삭제
pub const DELETE_SESSION: &str = "DELETE FROM sessions WHERE token = $1";

/// 만료 세션 정리
pub const DELETE_EXPIRED_SESSIONS: &str = "DELETE FROM sessions WHERE expires_at <= $1";
// endregion: --- Sessions

// region:    --- Auctions
/// 모든 경매 조회
pub const GET_ALL_AUCTIONS: &str =
    "SELECT id, owner_id, title, description, image_url, price, created_at, end_date, status, highest_bid, highest_bidder FROM auctions ORDER BY created_at DESC, id DESC";

/// 경매 조회
pub const GET_AUCTION: &str =
    "SELECT id, owner_id, title, description, image_url, price, created_at, end_date, status, highest_bid, highest_bidder FROM auctions WHERE id = $1";

/// 경매 생성
pub const INSERT_AUCTION: &str = r#"
    INSERT INTO auctions (owner_id, title, description, image_url, price, created_at, end_date, status, highest_bid)
    VALUES ($1, $2, $3, $4, $5, $6, $7, 'Open', 0)
    RETURNING id, owner_id, title, description, image_url, price, created_at, end_date, status, highest_bid, highest_bidder
"#;

/// 경매 종료
pub const CLOSE_AUCTION: &str =
    "UPDATE auctions SET status = 'Closed' WHERE id = $1 RETURNING id, owner_id, title, description, image_url, price, created_at, end_date, status, highest_bid, highest_bidder";

/// 종료일이 지난 경매 종료
pub const CLOSE_IF_EXPIRED: &str =
    "UPDATE auctions SET status = 'Closed' WHERE id = $1 AND status = 'Open' AND end_date < $2";

/// 종료일이 지난 모든 경매 종료
pub const CLOSE_ALL_EXPIRED: &str =
    "UPDATE auctions SET status = 'Closed' WHERE status = 'Open' AND end_date < $1";

/// 최고 입찰 비교 후 교체
pub const COMPARE_AND_SET_HIGHEST_BID: &str = r#"
    UPDATE auctions SET highest_bid = $1, highest_bidder = $2
    WHERE id = $3 AND highest_bid = $4 AND status = 'Open'
"#;
// endregion: --- Auctions

// region:    --- Bids
/// 입찰 기록 추가
pub const INSERT_BID: &str = r#"
    INSERT INTO bids (auction_id, user_id, amount, created_at)
    VALUES ($1, $2, $3, $4)
    RETURNING id
"#;

/// 입찰 이력 조회
pub const GET_BID_HISTORY: &str = r#"
    SELECT b.id, b.auction_id, b.user_id, u.username AS bidder, b.amount, b.created_at
    FROM bids b
    JOIN users u ON u.id = b.user_id
    WHERE b.auction_id = $1
    ORDER BY b.created_at DESC, b.id DESC
"#;
// endregion: --- Bids

// region:    --- Comments
/// 댓글 추가
pub const INSERT_COMMENT: &str = r#"
    INSERT INTO comments (auction_id, user_id, body, created_at)
    VALUES ($1, $2, $3, $4)
    RETURNING id
"#;

/// 댓글 조회
pub const GET_COMMENTS: &str = r#"
    SELECT c.id, c.auction_id, c.user_id, u.username AS author, c.body, c.created_at
    FROM comments c
    JOIN users u ON u.id = c.user_id
    WHERE c.auction_id = $1
    ORDER BY c.created_at ASC, c.id ASC
"#;
// endregion: --- Comments

// region:    --- Watchlist
/// 관심 목록 추가 (이미 있으면 무시)
pub const INSERT_WATCH: &str = r#"
    INSERT INTO watchlist (user_id, auction_id, created_at)
    VALUES ($1, $2, $3)
    ON CONFLICT (user_id, auction_id) DO NOTHING
"#;

/// 관심 목록 삭제
pub const DELETE_WATCH: &str = "DELETE FROM watchlist WHERE user_id = $1 AND auction_id = $2";

/// 관심 여부
pub const IS_WATCHING: &str =
    "SELECT EXISTS (SELECT 1 FROM watchlist WHERE user_id = $1 AND auction_id = $2) AS watching";

/// 관심 경매 조회
pub const GET_WATCHED_AUCTIONS: &str = r#"
    SELECT a.id, a.owner_id, a.title, a.description, a.image_url, a.price, a.created_at,
           a.end_date, a.status, a.highest_bid, a.highest_bidder
    FROM watchlist w
    JOIN auctions a ON a.id = w.auction_id
    WHERE w.user_id = $1
    ORDER BY w.created_at DESC
"#;
// endregion: --- Watchlist
