//! Cliente de la API con fallback local
//!
//! Toda lectura intenta primero el backend; una respuesta exitosa se
//! refleja en el espejo local y cualquier fallo (red, timeout, status
//! no exitoso) cae al espejo para que el consumidor nunca falle duro.
//! Las escrituras en modo fallback solo tocan el espejo y no se
//! reintentan: son un cache, no una cola de sincronización.

pub mod local_store;

use std::path::Path;
use std::time::Duration;

use anyhow::{anyhow, Result};
use chrono::Utc;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::dto::reservation_dto::CreateReservationRequest;
use crate::models::reservation::Reservation;
use crate::models::vehicle::Vehicle;
use crate::services::{availability_service, pricing_service};

use local_store::LocalStore;

/// Timeout total por request antes de caer al espejo local
const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

const AUTOS_KEY: &str = "autos";
const RESERVAS_KEY: &str = "reservas";

/// Envelope de la API para deserializar respuestas
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    success: bool,
    data: Option<T>,
    message: Option<String>,
}

pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    store: LocalStore,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, cache_dir: impl AsRef<Path>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.into(),
            store: LocalStore::new(cache_dir)?,
            token: None,
        })
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let mut request = self.http.get(format!("{}{}", self.base_url, path));
        if let Some(ref token) = self.token {
            request = request.bearer_auth(token);
        }

        let envelope: Envelope<T> = request.send().await?.error_for_status()?.json().await?;

        if !envelope.success {
            return Err(anyhow!(
                "backend respondió success=false: {}",
                envelope.message.unwrap_or_default()
            ));
        }

        envelope
            .data
            .ok_or_else(|| anyhow!("respuesta sin campo data"))
    }

    /// Listado de autos, con fallback al espejo local
    pub async fn list_autos(&self) -> Vec<Vehicle> {
        match self.get_json::<Vec<Vehicle>>("/api/autos").await {
            Ok(autos) => {
                if let Err(e) = self.store.put(AUTOS_KEY, &autos) {
                    tracing::warn!("No se pudo actualizar el espejo de autos: {}", e);
                }
                autos
            }
            Err(e) => {
                tracing::warn!("Backend inaccesible, usando espejo de autos: {}", e);
                self.store.get(AUTOS_KEY).unwrap_or_default()
            }
        }
    }

    /// Un auto por id, con fallback al espejo local
    pub async fn get_auto(&self, id: i64) -> Option<Vehicle> {
        match self.get_json::<Vehicle>(&format!("/api/autos/{}", id)).await {
            Ok(auto) => Some(auto),
            Err(e) => {
                tracing::warn!("Backend inaccesible, buscando auto {} en espejo: {}", id, e);
                let autos: Vec<Vehicle> = self.store.get(AUTOS_KEY).unwrap_or_default();
                autos.into_iter().find(|a| a.id == id)
            }
        }
    }

    /// Reservas del usuario autenticado, con fallback al espejo local
    pub async fn list_reservas(&self) -> Vec<Reservation> {
        match self.get_json::<Vec<Reservation>>("/api/reservas").await {
            Ok(reservas) => {
                if let Err(e) = self.store.put(RESERVAS_KEY, &reservas) {
                    tracing::warn!("No se pudo actualizar el espejo de reservas: {}", e);
                }
                reservas
            }
            Err(e) => {
                tracing::warn!("Backend inaccesible, usando espejo de reservas: {}", e);
                self.store.get(RESERVAS_KEY).unwrap_or_default()
            }
        }
    }

    /// Crear una reserva. Si el backend no responde, sintetiza una
    /// reserva plausible solo en el espejo local; no hay cola de
    /// reintentos y la próxima lectura exitosa la pisa.
    pub async fn crear_reserva(&self, request: CreateReservationRequest) -> Result<Reservation> {
        let mut req = self
            .http
            .post(format!("{}/api/reservas", self.base_url))
            .json(&serde_json::json!({
                "auto_id": request.auto_id,
                "fecha_inicio": request.fecha_inicio,
                "fecha_fin": request.fecha_fin,
                "estado": request.estado,
                "metodo_pago": request.metodo_pago,
            }));
        if let Some(ref token) = self.token {
            req = req.bearer_auth(token);
        }

        let backend = async {
            let envelope: Envelope<Reservation> =
                req.send().await?.error_for_status()?.json().await?;
            envelope
                .data
                .ok_or_else(|| anyhow!("respuesta sin campo data"))
        };

        match backend.await {
            Ok(reserva) => Ok(reserva),
            Err(e) => {
                tracing::warn!("Backend inaccesible, reserva solo en espejo local: {}", e);
                self.synthesize_local_reservation(request)
            }
        }
    }

    fn synthesize_local_reservation(
        &self,
        request: CreateReservationRequest,
    ) -> Result<Reservation> {
        let autos: Vec<Vehicle> = self.store.get(AUTOS_KEY).unwrap_or_default();
        let auto = autos
            .into_iter()
            .find(|a| a.id == request.auto_id)
            .ok_or_else(|| anyhow!("auto {} no está en el espejo local", request.auto_id))?;

        let desglose = pricing_service::calculate_total(
            auto.precio_dia,
            &auto.tipo,
            request.fecha_inicio,
            request.fecha_fin,
        )
        .map_err(|e| anyhow!("no se pudo cotizar localmente: {}", e))?;

        let mut reservas: Vec<Reservation> = self.store.get(RESERVAS_KEY).unwrap_or_default();

        // Mismo predicado de solape que el backend, sobre el espejo
        if reservas.iter().any(|r| {
            r.auto_id == request.auto_id
                && availability_service::blocks_range(r, request.fecha_inicio, request.fecha_fin)
        }) {
            return Err(anyhow!(
                "el auto {} ya tiene una reserva local en ese rango",
                request.auto_id
            ));
        }

        let next_id = reservas.iter().map(|r| r.id).max().unwrap_or(0) + 1;

        let reserva = Reservation {
            id: next_id,
            usuario_id: 0,
            auto_id: request.auto_id,
            fecha_inicio: request.fecha_inicio,
            fecha_fin: request.fecha_fin,
            precio_total: desglose.total,
            estado: "Pendiente".to_string(),
            metodo_pago: request.metodo_pago.map(sqlx::types::Json),
            created_at: Utc::now(),
        };

        reservas.push(reserva.clone());
        self.store.put(RESERVAS_KEY, &reservas)?;

        Ok(reserva)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    fn auto_de_prueba(id: i64) -> Vehicle {
        Vehicle {
            id,
            marca: "Toyota".to_string(),
            modelo: "RAV4".to_string(),
            anio: 2022,
            tipo: "SUV".to_string(),
            color: Some("Rojo".to_string()),
            placa: format!("ABC-{:03}", id),
            precio_dia: Decimal::from(100),
            disponible: true,
            imagen: None,
            combustible: Some("Gasolina".to_string()),
            transmision: Some("Automática".to_string()),
            capacidad: Some(5),
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_fallback_a_espejo_cuando_backend_inaccesible() {
        let dir = tempfile::tempdir().unwrap();
        // Puerto sin listener: todo request falla rápido
        let client = ApiClient::new("http://127.0.0.1:9", dir.path()).unwrap();

        client
            .store
            .put(AUTOS_KEY, &vec![auto_de_prueba(1), auto_de_prueba(2)])
            .unwrap();

        let autos = client.list_autos().await;
        assert_eq!(autos.len(), 2);

        let auto = client.get_auto(2).await;
        assert_eq!(auto.unwrap().id, 2);

        assert!(client.get_auto(99).await.is_none());
    }

    #[tokio::test]
    async fn test_espejo_vacio_devuelve_lista_vacia() {
        let dir = tempfile::tempdir().unwrap();
        let client = ApiClient::new("http://127.0.0.1:9", dir.path()).unwrap();

        assert!(client.list_autos().await.is_empty());
        assert!(client.list_reservas().await.is_empty());
    }

    #[tokio::test]
    async fn test_reserva_sintetizada_en_fallback() {
        let dir = tempfile::tempdir().unwrap();
        let client = ApiClient::new("http://127.0.0.1:9", dir.path()).unwrap();

        client.store.put(AUTOS_KEY, &vec![auto_de_prueba(1)]).unwrap();

        let reserva = client
            .crear_reserva(CreateReservationRequest {
                auto_id: 1,
                fecha_inicio: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
                fecha_fin: NaiveDate::from_ymd_opt(2024, 3, 8).unwrap(),
                estado: None,
                metodo_pago: None,
            })
            .await
            .unwrap();

        // 7 días de SUV a 100/día: 15% de descuento y ×1.5
        assert_eq!(reserva.precio_total, Decimal::new(89250, 2));
        assert_eq!(reserva.estado, "Pendiente");

        // Quedó persistida en el espejo
        let reservas: Vec<Reservation> = client.store.get(RESERVAS_KEY).unwrap();
        assert_eq!(reservas.len(), 1);
        assert_eq!(reservas[0].id, reserva.id);
    }

    #[tokio::test]
    async fn test_reserva_local_solapada_se_rechaza() {
        let dir = tempfile::tempdir().unwrap();
        let client = ApiClient::new("http://127.0.0.1:9", dir.path()).unwrap();

        client.store.put(AUTOS_KEY, &vec![auto_de_prueba(1)]).unwrap();

        client
            .crear_reserva(CreateReservationRequest {
                auto_id: 1,
                fecha_inicio: NaiveDate::from_ymd_opt(2024, 3, 10).unwrap(),
                fecha_fin: NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
                estado: None,
                metodo_pago: None,
            })
            .await
            .unwrap();

        // Solapa 12–20 con la 10–15 ya espejada
        let resultado = client
            .crear_reserva(CreateReservationRequest {
                auto_id: 1,
                fecha_inicio: NaiveDate::from_ymd_opt(2024, 3, 12).unwrap(),
                fecha_fin: NaiveDate::from_ymd_opt(2024, 3, 20).unwrap(),
                estado: None,
                metodo_pago: None,
            })
            .await;

        assert!(resultado.is_err());

        let reservas: Vec<Reservation> = client.store.get(RESERVAS_KEY).unwrap();
        assert_eq!(reservas.len(), 1);
    }
}
