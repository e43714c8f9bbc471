//! Routes that carry [`ThemeMessage`]s between windows.
//!
//! A [`ChannelHub`] stands in for the host's named broadcast channels. Every
//! window holding a clone of the same hub reaches the same channels. The
//! direct route is a plain `mpsc` pair between an editor and the window that
//! opened it.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use tokio::sync::{broadcast, mpsc};
use tracing::{debug, warn};

use crate::ThemeMessage;

pub const CHANNEL_NAME: &str = "theme-editor-channel";

/// Messages a slow receiver can fall behind before it starts losing them.
pub const CHANNEL_CAPACITY: usize = 64;

#[derive(Debug, thiserror::Error)]
pub enum ChannelError {
    #[error("Broadcast channels are not supported by this host")]
    Unsupported,
}

type Channels = HashMap<String, broadcast::Sender<ThemeMessage>>;

#[derive(Debug, Clone)]
pub struct ChannelHub {
    channels: Option<Rc<RefCell<Channels>>>,
}

impl Default for ChannelHub {
    fn default() -> Self {
        Self::new()
    }
}

impl ChannelHub {
    pub fn new() -> Self {
        Self {
            channels: Some(Rc::new(RefCell::new(HashMap::new()))),
        }
    }

    /// A hub whose host has no broadcast channels. Opening always fails.
    pub fn unsupported() -> Self {
        Self { channels: None }
    }

    pub fn is_supported(&self) -> bool {
        self.channels.is_some()
    }

    /// Sending end of the channel called `name`, created on first use.
    pub fn open(&self, name: &str) -> Result<broadcast::Sender<ThemeMessage>, ChannelError> {
        let channels = self.channels.as_ref().ok_or(ChannelError::Unsupported)?;
        let sender = channels
            .borrow_mut()
            .entry(name.to_string())
            .or_insert_with(|| broadcast::channel(CHANNEL_CAPACITY).0)
            .clone();
        Ok(sender)
    }

    /// Receiving end that sees every message sent after this call.
    pub fn subscribe(&self, name: &str) -> Result<broadcast::Receiver<ThemeMessage>, ChannelError> {
        Ok(self.open(name)?.subscribe())
    }
}

/// A connected direct route, as handed to an editor window and its opener.
pub fn direct_route() -> (
    mpsc::UnboundedSender<ThemeMessage>,
    mpsc::UnboundedReceiver<ThemeMessage>,
) {
    mpsc::unbounded_channel()
}

/// Editor side: sends each message on every route it has.
#[derive(Debug, Clone)]
pub struct ThemePublisher {
    opener: Option<mpsc::UnboundedSender<ThemeMessage>>,
    broadcast: Option<broadcast::Sender<ThemeMessage>>,
}

impl ThemePublisher {
    /// Falls back to the direct route alone when the hub cannot open
    /// [`CHANNEL_NAME`].
    pub fn new(hub: &ChannelHub, opener: Option<mpsc::UnboundedSender<ThemeMessage>>) -> Self {
        let broadcast = match hub.open(CHANNEL_NAME) {
            Ok(sender) => Some(sender),
            Err(e) => {
                debug!(error = %e, "Publishing without broadcast channel");
                None
            }
        };
        Self { opener, broadcast }
    }

    pub fn has_routes(&self) -> bool {
        self.opener.is_some() || self.broadcast.is_some()
    }

    /// Fire and forget. Returns how many routes accepted the message; a
    /// route with nobody listening drops it.
    pub fn publish(&self, message: &ThemeMessage) -> usize {
        let mut delivered = 0;

        if let Some(opener) = &self.opener {
            match opener.send(message.clone()) {
                Ok(()) => delivered += 1,
                Err(_) => debug!(kind = message.kind(), "Opener is gone"),
            }
        }

        if let Some(broadcast) = &self.broadcast {
            match broadcast.send(message.clone()) {
                Ok(receivers) => {
                    debug!(kind = message.kind(), receivers, "Broadcast theme message");
                    delivered += 1;
                }
                Err(_) => debug!(kind = message.kind(), "No broadcast listeners"),
            }
        }

        delivered
    }
}

/// Window side: the receiving ends of whichever routes reach this window.
#[derive(Debug)]
pub struct ThemeReceiver {
    direct: Option<mpsc::UnboundedReceiver<ThemeMessage>>,
    broadcast: Option<broadcast::Receiver<ThemeMessage>>,
}

impl ThemeReceiver {
    pub fn new(hub: &ChannelHub, direct: Option<mpsc::UnboundedReceiver<ThemeMessage>>) -> Self {
        let broadcast = match hub.subscribe(CHANNEL_NAME) {
            Ok(receiver) => Some(receiver),
            Err(e) => {
                debug!(error = %e, "Listening without broadcast channel");
                None
            }
        };
        Self { direct, broadcast }
    }

    /// Everything pending right now: direct route first, then broadcast,
    /// each in delivery order.
    pub fn drain(&mut self) -> Vec<ThemeMessage> {
        let mut messages = Vec::new();

        if let Some(direct) = self.direct.as_mut() {
            while let Ok(message) = direct.try_recv() {
                messages.push(message);
            }
        }

        if let Some(broadcast) = self.broadcast.as_mut() {
            loop {
                match broadcast.try_recv() {
                    Ok(message) => messages.push(message),
                    Err(broadcast::error::TryRecvError::Lagged(skipped)) => {
                        warn!(skipped, "Theme receiver fell behind, messages dropped");
                    }
                    Err(_) => break,
                }
            }
        }

        messages
    }

    /// Wait for the next message on either route. `None` once every route
    /// is closed.
    pub async fn recv(&mut self) -> Option<ThemeMessage> {
        tokio::select! {
            Some(message) = next_direct(&mut self.direct) => Some(message),
            Some(message) = next_broadcast(&mut self.broadcast) => Some(message),
            else => None,
        }
    }
}

async fn next_direct(
    route: &mut Option<mpsc::UnboundedReceiver<ThemeMessage>>,
) -> Option<ThemeMessage> {
    route.as_mut()?.recv().await
}

async fn next_broadcast(
    route: &mut Option<broadcast::Receiver<ThemeMessage>>,
) -> Option<ThemeMessage> {
    let receiver = route.as_mut()?;
    loop {
        match receiver.recv().await {
            Ok(message) => return Some(message),
            Err(broadcast::error::RecvError::Lagged(skipped)) => {
                warn!(skipped, "Theme receiver fell behind, messages dropped");
            }
            Err(broadcast::error::RecvError::Closed) => return None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_hub_fails_to_open() {
        let hub = ChannelHub::unsupported();
        assert!(!hub.is_supported());
        assert!(matches!(hub.open(CHANNEL_NAME), Err(ChannelError::Unsupported)));
    }

    #[test]
    fn test_same_name_shares_channel() {
        let hub = ChannelHub::new();
        let mut first = hub.subscribe(CHANNEL_NAME).unwrap();
        let mut other = hub.clone().subscribe("other").unwrap();

        hub.open(CHANNEL_NAME)
            .unwrap()
            .send(ThemeMessage::ResetTheme)
            .unwrap();

        assert_eq!(first.try_recv().unwrap(), ThemeMessage::ResetTheme);
        assert!(other.try_recv().is_err());
    }

    #[test]
    fn test_publish_without_listeners_is_lost() {
        let hub = ChannelHub::new();
        let publisher = ThemePublisher::new(&hub, None);
        assert!(publisher.has_routes());
        assert_eq!(publisher.publish(&ThemeMessage::ResetTheme), 0);
    }

    #[test]
    fn test_unsupported_hub_uses_direct_route_only() {
        let hub = ChannelHub::unsupported();
        let (tx, rx) = direct_route();
        let publisher = ThemePublisher::new(&hub, Some(tx));
        let mut receiver = ThemeReceiver::new(&hub, Some(rx));

        assert_eq!(publisher.publish(&ThemeMessage::ResetTheme), 1);
        assert_eq!(receiver.drain(), vec![ThemeMessage::ResetTheme]);
        assert!(receiver.drain().is_empty());
    }

    #[test]
    fn test_lagged_receiver_keeps_newest() {
        let hub = ChannelHub::new();
        let mut receiver = ThemeReceiver::new(&hub, None);
        let publisher = ThemePublisher::new(&hub, None);

        for _ in 0..CHANNEL_CAPACITY + 3 {
            publisher.publish(&ThemeMessage::ResetTheme);
        }
        assert_eq!(receiver.drain().len(), CHANNEL_CAPACITY);
    }
}
